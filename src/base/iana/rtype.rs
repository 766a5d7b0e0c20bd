//! Resource record types.

//------------ Rtype ---------------------------------------------------------

iana_registry! {
    /// The type of a resource record.
    ///
    /// Types without a mnemonic are written as `TYPE` followed by their
    /// number, as described in [RFC 3597]. The [IANA registry] lists all
    /// assigned values.
    ///
    /// Two values from the private use range stand for the synthetic
    /// records that cache negative answers, [`Rtype::NODATA`] and
    /// [`Rtype::NXDOMAIN`]. They never appear in a DNS message.
    ///
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    pub struct Rtype(u16);
    text: prefix "TYPE";
    kind: "record type";

    // RFC 1035
    A = 1, "A";
    NS = 2, "NS";
    CNAME = 5, "CNAME";
    SOA = 6, "SOA";
    NULL = 10, "NULL";
    WKS = 11, "WKS";
    PTR = 12, "PTR";
    HINFO = 13, "HINFO";
    MINFO = 14, "MINFO";
    MX = 15, "MX";
    TXT = 16, "TXT";

    RP = 17, "RP";
    AFSDB = 18, "AFSDB";
    SIG = 24, "SIG";
    KEY = 25, "KEY";
    AAAA = 28, "AAAA";
    LOC = 29, "LOC";
    SRV = 33, "SRV";
    NAPTR = 35, "NAPTR";
    KX = 36, "KX";
    CERT = 37, "CERT";
    DNAME = 39, "DNAME";
    APL = 42, "APL";

    // DNSSEC
    DS = 43, "DS";
    SSHFP = 44, "SSHFP";
    IPSECKEY = 45, "IPSECKEY";
    RRSIG = 46, "RRSIG";
    NSEC = 47, "NSEC";
    DNSKEY = 48, "DNSKEY";
    DHCID = 49, "DHCID";
    NSEC3 = 50, "NSEC3";
    NSEC3PARAM = 51, "NSEC3PARAM";
    TLSA = 52, "TLSA";
    CDS = 59, "CDS";
    CDNSKEY = 60, "CDNSKEY";
    OPENPGPKEY = 61, "OPENPGPKEY";
    CSYNC = 62, "CSYNC";
    ZONEMD = 63, "ZONEMD";
    SVCB = 64, "SVCB";
    HTTPS = 65, "HTTPS";
    SPF = 99, "SPF";
    URI = 256, "URI";
    CAA = 257, "CAA";

    /// The owner exists but has no records of the given type.
    NODATA = 0xFF00, "NODATA";

    /// The owner does not exist.
    NXDOMAIN = 0xFF01, "NXDOMAIN";
}

//============ Tests =========================================================
