//! Delegation signer digest algorithms.

//------------ DigestAlg -----------------------------------------------------

iana_registry! {
    /// The digest algorithm of a DS record.
    ///
    /// See the [IANA registry] for assigned values.
    ///
    /// [IANA registry]: https://www.iana.org/assignments/ds-rr-types/ds-rr-types.xhtml#ds-rr-types-1
    pub struct DigestAlg(u8);
    text: decimal;
    kind: "digest algorithm";

    SHA1 = 1, "SHA-1";
    SHA256 = 2, "SHA-256";
    GOST = 3, "GOST R 34.11-94";
    SHA384 = 4, "SHA-384";
}

impl DigestAlg {
    /// Returns the octet length of a digest, if the algorithm is known.
    ///
    /// The DS wire format has no length for the digest, so record data
    /// with an unknown algorithm can only be checked for being non-empty.
    #[must_use]
    pub const fn digest_len(self) -> Option<usize> {
        match self.0 {
            1 => Some(20),
            2 | 3 => Some(32),
            4 => Some(48),
            _ => None,
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::DigestAlg;

    #[test]
    fn digest_len() {
        assert_eq!(DigestAlg::SHA1.digest_len(), Some(20));
        assert_eq!(DigestAlg::GOST.digest_len(), Some(32));
        assert_eq!(DigestAlg::SHA384.digest_len(), Some(48));
        assert_eq!(DigestAlg::from_int(7).digest_len(), None);
    }

    #[test]
    fn text() {
        assert_eq!(format!("{}", DigestAlg::SHA256), "2");
        assert_eq!("SHA-256".parse::<DigestAlg>(), Ok(DigestAlg::SHA256));
        assert_eq!("sha-1".parse::<DigestAlg>(), Ok(DigestAlg::SHA1));
        assert_eq!("4".parse::<DigestAlg>(), Ok(DigestAlg::SHA384));
        assert!("256".parse::<DigestAlg>().is_err());
    }
}
