//! Record data for host addresses: A and AAAA records.

use std::net::{Ipv4Addr, Ipv6Addr};

address_type! {
    /// A record data, the IPv4 address of a host.
    ///
    /// See [RFC 1035, section 3.4.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.4.1
    (A, A, Ipv4Addr)
}

address_type! {
    /// AAAA record data, the IPv6 address of a host.
    ///
    /// See [RFC 3596].
    ///
    /// [RFC 3596]: https://tools.ietf.org/html/rfc3596
    (Aaaa, AAAA, Ipv6Addr)
}

impl A {
    #[must_use]
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> Self {
        A::new(Ipv4Addr::new(a, b, c, d))
    }
}

//============ Testing =======================================================
