//! NSEC3 hash algorithms.

//------------ Nsec3HashAlg --------------------------------------------------

iana_registry! {
    /// The hash algorithm of NSEC3 and NSEC3PARAM records.
    ///
    /// [RFC 5155] defines SHA-1 as the only algorithm and no other has been
    /// assigned since.
    ///
    /// [RFC 5155]: https://tools.ietf.org/html/rfc5155
    pub struct Nsec3HashAlg(u8);
    text: decimal;
    kind: "NSEC3 hash algorithm";

    SHA1 = 1, "SHA-1";
}

impl Nsec3HashAlg {
    /// Returns whether record data using this algorithm can be parsed.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.0 == Self::SHA1.0
    }
}
