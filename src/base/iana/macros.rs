//! The macro behind the registry types.

/// Defines a registry type wrapping an integer.
///
/// Each entry gives the associated constant, its value, and the mnemonic
/// used in presentation format. Mnemonics are matched ignoring case.
///
/// The line after the type declaration picks the text representation:
///
/// * `decimal` displays and serializes the plain number. The mnemonic is
///   accepted when reading.
/// * `prefix "TYPE"` displays the mnemonic if there is one and the prefix
///   followed by the number otherwise, as in `TYPE65296`. Human readable
///   serializers get that text, all others the number.
///
/// `kind` names the registry in error messages.
macro_rules! iana_registry {
    (
        $(#[$attr:meta])*
        pub struct $name:ident($int:ty);
        text: $style:ident $( $prefix:literal )?;
        kind: $kind:literal;

        $(
            $(#[$vattr:meta])*
            $variant:ident = $value:literal, $mnemonic:literal;
        )*
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name($int);

        impl $name {
            $(
                $(#[$vattr])*
                pub const $variant: Self = Self($value);
            )*

            const MNEMONICS: &'static [(Self, &'static str)] = &[
                $( (Self::$variant, $mnemonic), )*
            ];

            #[must_use]
            pub const fn from_int(value: $int) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn to_int(self) -> $int {
                self.0
            }

            /// Returns the value for a mnemonic.
            #[must_use]
            pub fn from_mnemonic(mnemonic: &[u8]) -> Option<Self> {
                Self::MNEMONICS
                    .iter()
                    .find(|(_, m)| m.as_bytes().eq_ignore_ascii_case(mnemonic))
                    .map(|&(value, _)| value)
            }

            /// Returns the mnemonic of the value if it has one.
            #[must_use]
            pub fn mnemonic(self) -> Option<&'static str> {
                Self::MNEMONICS
                    .iter()
                    .find(|&&(value, _)| value == self)
                    .map(|&(_, m)| m)
            }

            pub const COMPOSE_LEN: u16 =
                <$int as $crate::base::wire::Compose>::COMPOSE_LEN;

            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                parser: &mut octseq::parse::Parser<'_, Octs>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                <$int as $crate::base::wire::Parse<'_, Octs>>::parse(parser)
                    .map(Self)
            }

            pub fn compose<Target: octseq::builder::OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                $crate::base::wire::Compose::compose(&self.0, target)
            }
        }

        impl From<$int> for $name {
            fn from(value: $int) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $int {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                $(
                    if *self == Self::$variant {
                        return f.write_str(concat!(
                            stringify!($name), "::", stringify!($variant)
                        ));
                    }
                )*
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        iana_registry!(@text $name, $int, $kind, $style $( $prefix )?);
    };

    (@text $name:ident, $int:ty, $kind:literal, decimal) => {
        impl core::str::FromStr for $name {
            type Err = $crate::base::iana::FromStrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_mnemonic(s.as_bytes())
                    .or_else(|| {
                        $crate::base::iana::decimal(s.as_bytes()).map(Self)
                    })
                    .ok_or($crate::base::iana::FromStrError($kind))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                <$int as serde::Deserialize>::deserialize(deserializer)
                    .map(Self)
            }
        }
    };

    (@text $name:ident, $int:ty, $kind:literal, prefix $prefix:literal) => {
        impl $name {
            /// Reads a mnemonic or the prefix followed by a decimal number.
            #[must_use]
            pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
                if let Some(value) = Self::from_mnemonic(bytes) {
                    return Some(value);
                }
                let split = $prefix.len().min(bytes.len());
                let (head, tail) = bytes.split_at(split);
                if !head.eq_ignore_ascii_case($prefix.as_bytes()) {
                    return None;
                }
                $crate::base::iana::decimal(tail).map(Self)
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::base::iana::FromStrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_bytes(s.as_bytes())
                    .ok_or($crate::base::iana::FromStrError($kind))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match self.mnemonic() {
                    Some(mnemonic) => f.write_str(mnemonic),
                    None => write!(f, concat!($prefix, "{}"), self.0),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    serde::Serialize::serialize(&self.0, serializer)
                }
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                struct Visitor;

                impl<'de> serde::de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        f.write_str(concat!("a ", $kind))
                    }

                    fn visit_str<E: serde::de::Error>(
                        self,
                        v: &str,
                    ) -> Result<Self::Value, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: serde::de::Error>(
                        self,
                        v: u64,
                    ) -> Result<Self::Value, E> {
                        <$int>::try_from(v).map($name).map_err(E::custom)
                    }
                }

                if deserializer.is_human_readable() {
                    deserializer.deserialize_any(Visitor)
                } else {
                    <$int as serde::Deserialize>::deserialize(deserializer)
                        .map($name)
                }
            }
        }
    };
}
