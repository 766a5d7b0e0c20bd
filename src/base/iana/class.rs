//! DNS classes.

//------------ Class ---------------------------------------------------------

iana_registry! {
    /// The class of a resource record.
    ///
    /// Zone files only ever name IN, CH, and HS. Any other class is written
    /// as `CLASS` followed by its number, as described in [RFC 3597].
    ///
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    pub struct Class(u16);
    text: prefix "CLASS";
    kind: "class";

    /// Internet.
    IN = 1, "IN";

    /// Chaosnet.
    CH = 3, "CH";

    /// Hesiod.
    HS = 4, "HS";
}

//============ Tests =========================================================
