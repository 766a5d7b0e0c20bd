//! DNSSEC algorithm numbers.

//------------ SecAlg --------------------------------------------------------

iana_registry! {
    /// The signing algorithm of DNSKEY, RRSIG, and DS records.
    ///
    /// Zone files write the number. See the [IANA registry] for assigned
    /// values.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml#dns-sec-alg-numbers-1
    pub struct SecAlg(u8);
    text: decimal;
    kind: "security algorithm";

    /// Deprecated by RFC 6725.
    RSAMD5 = 1, "RSAMD5";
    DH = 2, "DH";
    DSA = 3, "DSA";
    RSASHA1 = 5, "RSASHA1";
    DSA_NSEC3_SHA1 = 6, "DSA-NSEC3-SHA1";
    RSASHA1_NSEC3_SHA1 = 7, "RSASHA1-NSEC3-SHA1";
    RSASHA256 = 8, "RSASHA256";
    RSASHA512 = 10, "RSASHA512";
    ECC_GOST = 12, "ECC-GOST";
    ECDSAP256SHA256 = 13, "ECDSAP256SHA256";
    ECDSAP384SHA384 = 14, "ECDSAP384SHA384";
    ED25519 = 15, "ED25519";
    ED448 = 16, "ED448";
    PRIVATEDNS = 253, "PRIVATEDNS";
    PRIVATEOID = 254, "PRIVATEOID";
}
