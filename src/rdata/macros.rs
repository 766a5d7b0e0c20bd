//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

/// Creates the record data enum for all implemented record types.
///
/// Takes a list of modules and the record data types they define. Every
/// type needs an associated constant `RTYPE`, a `parse` function taking a
/// parser limited to the record data, and implementations of
/// `ComposeRecordData` and `Display`.
macro_rules! rdata_types {
    ( $(
        $module:ident::{
            $( $rtype:ident, )*
        }
    )* ) => {
        $(
            pub use self::$module::{ $( $rtype, )* };
        )*

        //------------- RecordData -------------------------------------------

        /// Record data for all implemented record types.
        ///
        /// This enum collects the record data types for all currently
        /// implemented record types. Data for all other record types is
        /// kept as raw octets in the `Unknown` variant, so every record
        /// type can be parsed and composed again unchanged.
        ///
        /// Comparing two values compares the variants first, so data of
        /// different record types is never equal. Domain names embedded in
        /// the data compare ignoring ASCII case.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub enum RecordData {
            $( $(
                $rtype($rtype),
            )* )*
            Unknown($crate::base::rdata::UnknownRecordData),
        }

        impl RecordData {
            /// Parses record data of the given record type.
            ///
            /// The parser must be limited to exactly the record data. Data
            /// for record types not implemented is returned as the
            /// `Unknown` variant, so this only fails if the data is
            /// malformed.
            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<Octs>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                $( $(
                    if rtype == $rtype::RTYPE {
                        return $rtype::parse(parser).map(RecordData::$rtype)
                    }
                )* )*
                $crate::base::rdata::UnknownRecordData::parse(
                    rtype, parser
                ).map(RecordData::Unknown)
            }
        }

        //--- From

        $( $(
            impl From<$rtype> for RecordData {
                fn from(value: $rtype) -> Self {
                    RecordData::$rtype(value)
                }
            }
        )* )*

        impl From<$crate::base::rdata::UnknownRecordData> for RecordData {
            fn from(value: $crate::base::rdata::UnknownRecordData) -> Self {
                RecordData::Unknown(value)
            }
        }

        //--- ComposeRecordData and ParseRecordData

        impl $crate::base::rdata::ComposeRecordData for RecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        RecordData::$rtype(ref inner) => inner.rtype(),
                    )* )*
                    RecordData::Unknown(ref inner) => inner.rtype(),
                }
            }

            fn rdlen(&self, compress: bool) -> Option<u16> {
                match *self {
                    $( $(
                        RecordData::$rtype(ref inner) => inner.rdlen(compress),
                    )* )*
                    RecordData::Unknown(ref inner) => inner.rdlen(compress),
                }
            }

            fn compose_rdata<Target: $crate::base::wire::Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                match *self {
                    $( $(
                        RecordData::$rtype(ref inner) => {
                            inner.compose_rdata(target)
                        }
                    )* )*
                    RecordData::Unknown(ref inner) => {
                        inner.compose_rdata(target)
                    }
                }
            }
        }

        impl<'a, Octs: AsRef<[u8]> + ?Sized>
        $crate::base::rdata::ParseRecordData<'a, Octs> for RecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'a, Octs>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                Self::parse(rtype, parser).map(Some)
            }
        }

        //--- Display

        impl core::fmt::Display for RecordData {
            fn fmt(
                &self, f: &mut core::fmt::Formatter
            ) -> core::fmt::Result {
                match *self {
                    $( $(
                        RecordData::$rtype(ref inner) => inner.fmt(f),
                    )* )*
                    RecordData::Unknown(ref inner) => inner.fmt(f),
                }
            }
        }
    }
}

/// Creates a record data type that consists of a single domain name.
///
/// The name is eligible for compression when composing.
macro_rules! name_type {
    ($(#[$attr:meta])* ( $target:ident, $rtype:ident, $field:ident,
                         $into_field:ident ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub(crate) const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            #[must_use]
            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            #[must_use]
            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            #[must_use]
            pub fn $into_field(self) -> $crate::base::name::Name {
                self.$field
            }

            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                parser: &mut octseq::parse::Parser<Octs>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                $crate::base::name::Name::parse(parser).map(Self::new)
            }
        }

        //--- From and FromStr

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        impl core::str::FromStr for $target {
            type Err = $crate::base::name::NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self::new)
            }
        }

        //--- ParseRecordData, ComposeRecordData

        impl<'a, Octs: AsRef<[u8]> + ?Sized>
        $crate::base::rdata::ParseRecordData<'a, Octs> for $target {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'a, Octs>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                if rtype == $target::RTYPE {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $target::RTYPE
            }

            fn rdlen(&self, compress: bool) -> Option<u16> {
                if compress {
                    None
                } else {
                    Some(self.$field.len() as u16)
                }
            }

            fn compose_rdata<Target: $crate::base::wire::Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_compressed_name(&self.$field)
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                self.$field.fmt(f)
            }
        }
    }
}

/// Creates a record data type that consists of a single IP address.
///
/// The address has a fixed size on the wire and reads and writes in the
/// standard text notation.
macro_rules! address_type {
    ($(#[$attr:meta])* ( $target:ident, $rtype:ident, $addr:ty ) ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub struct $target {
            addr: $addr,
        }

        impl $target {
            pub(crate) const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            #[must_use]
            pub fn new(addr: $addr) -> Self {
                $target { addr }
            }

            #[must_use]
            pub fn addr(&self) -> $addr {
                self.addr
            }

            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                parser: &mut octseq::parse::Parser<Octs>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                <$addr as $crate::base::wire::Parse<'_, Octs>>::parse(parser)
                    .map(Self::new)
            }
        }

        impl From<$addr> for $target {
            fn from(addr: $addr) -> Self {
                Self::new(addr)
            }
        }

        impl From<$target> for $addr {
            fn from(data: $target) -> Self {
                data.addr
            }
        }

        impl core::str::FromStr for $target {
            type Err = std::net::AddrParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self::new)
            }
        }

        impl<'a, Octs: AsRef<[u8]> + ?Sized>
        $crate::base::rdata::ParseRecordData<'a, Octs> for $target {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'a, Octs>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                if rtype == $target::RTYPE {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $target::RTYPE
            }

            fn rdlen(&self, _compress: bool) -> Option<u16> {
                Some(<$addr as $crate::base::wire::Compose>::COMPOSE_LEN)
            }

            fn compose_rdata<Target: $crate::base::wire::Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                $crate::base::wire::Compose::compose(&self.addr, target)
            }
        }

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.addr, f)
            }
        }
    }
}
