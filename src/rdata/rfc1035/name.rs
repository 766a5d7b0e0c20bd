//! Record data type from RFC 1035 that consist of a single domain name.
//!
//! This is a private module. It’s content is re-exported by the parent.

//------------ Cname --------------------------------------------------------

name_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in [RFC 1035, section 3.3.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
    (Cname, CNAME, cname, into_cname)
}

//------------ Ns -----------------------------------------------------------

name_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and domain.
    ///
    /// The NS record type is defined in [RFC 1035, section 3.3.11][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
    (Ns, NS, nsdname, into_nsdname)
}

//------------ Ptr ----------------------------------------------------------

name_type! {
    /// PTR record data.
    ///
    /// PRT records are used in special domains to point to some other
    /// location in the domain space.
    ///
    /// The PTR record type is defined in [RFC 1035, section 3.3.12][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.12
    (Ptr, PTR, ptrdname, into_ptrdname)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::compress::Compressor;
    use crate::base::name::Name;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use crate::base::rdata::ComposeRecordData;
    use crate::base::wire::Composer;
    use core::str::FromStr;
    use octseq::builder::infallible;

    #[test]
    fn cname_compose_parse() {
        let rdata = Cname::from_str("www.example.com").unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Cname::parse);
        assert_eq!(rdata.to_string(), "www.example.com.");
    }

    #[test]
    fn ns_compressed() {
        let mut target = Compressor::new(Vec::new());
        infallible(
            target.append_compressed_name(&Name::from_str("example").unwrap()),
        );
        let rdata = Ns::from_str("ns.EXAMPLE").unwrap();
        assert_eq!(rdata.rdlen(true), None);
        infallible(rdata.compose_rdata(&mut target));
        assert_eq!(
            target.as_slice(),
            b"\x07example\x00\x02ns\xC0\x00".as_slice()
        );
    }

    #[test]
    fn ptr_eq_ignores_case() {
        assert_eq!(
            Ptr::from_str("host.EXAMPLE.org").unwrap(),
            Ptr::from_str("HOST.example.ORG.").unwrap()
        );
    }
}
