//! Domain name compression.
//!
//! Name compression is described in [RFC 1035, section 4.1.4]. A name, or
//! the tail end of a name, that has appeared earlier in a message can be
//! replaced by a two octet pointer to that earlier occurence.
//!
//! [RFC 1035, section 4.1.4]: https://tools.ietf.org/html/rfc1035#section-4.1.4

use super::name::Name;
use super::wire::{Compose, Composer};
use octseq::builder::{OctetsBuilder, Truncate};
use std::collections::HashMap;
use std::vec::Vec;

//------------ Compressor ----------------------------------------------------

/// A domain name compressor.
///
/// This type wraps around an octets builder and implements domain name
/// compression for it. It remembers the position of every name suffix it
/// has written in a hash map keyed by the suffix’s wire format in lower
/// case, so suffixes match irrespective of letter case.
///
/// The position of a domain name is calculated relative to the beginning of
/// the underlying octets builder. This means that this builder must
/// represent the message only.
#[derive(Clone, Debug)]
pub struct Compressor<Target> {
    /// The underlying octets builder.
    target: Target,

    /// The name suffixes we have encountered so far and their position.
    entries: HashMap<Vec<u8>, u16>,
}

impl<Target> Compressor<Target> {
    /// Creates a compressor from an octets builder.
    pub fn new(target: Target) -> Self {
        Compressor {
            target,
            entries: HashMap::new(),
        }
    }

    /// Returns a reference to the underlying octets builder.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the compressor into the underlying octets builder.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns a reference to the octets slice of the content.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }
}

//--- AsRef and AsMut

impl<Target: AsRef<[u8]>> AsRef<[u8]> for Compressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for Compressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

//--- OctetsBuilder, Truncate, and Composer

impl<Target: OctetsBuilder> OctetsBuilder for Compressor<Target> {
    type AppendError = Target::AppendError;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.target.append_slice(slice)
    }
}

impl<Target: Truncate> Truncate for Compressor<Target> {
    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        self.entries.retain(|_, pos| usize::from(*pos) < len);
    }
}

impl<Target: Composer> Composer for Compressor<Target> {
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        let wire = name.as_slice();
        for (start, label) in name.iter_labels() {
            let suffix = wire[start..].to_ascii_lowercase();

            // If we already know this suffix, append a pointer and be done.
            if let Some(&pos) = self.entries.get(&suffix) {
                return (pos | 0xC000).compose(self);
            }

            // Pointers only have 14 bits, so later positions can’t be
            // remembered.
            let pos = self.target.as_ref().len();
            if pos <= 0x3FFF {
                self.entries.insert(suffix, pos as u16);
            }
            self.append_slice(&wire[start..start + label.len() + 1])?;
        }
        self.append_slice(&[0])
    }

    fn can_compress(&self) -> bool {
        true
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use octseq::builder::infallible;
    use octseq::parse::Parser;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn compress_suffixes() {
        let mut target = Compressor::new(Vec::new());
        infallible(target.append_compressed_name(&name("example.com")));
        infallible(target.append_compressed_name(&name("www.EXAMPLE.com")));
        infallible(target.append_compressed_name(&name("www.example.com")));
        infallible(target.append_compressed_name(&name("org")));
        assert_eq!(
            target.as_slice(),
            b"\x07example\x03com\x00\
              \x03www\xC0\x00\
              \xC0\x0D\
              \x03org\x00"
                .as_slice()
        );

        let data = target.into_target();
        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(Name::parse(&mut parser).unwrap(), name("example.com"));
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(Name::parse(&mut parser).unwrap(), name("org"));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn no_pointers_past_14_bits() {
        let mut target = Compressor::new(vec![0; 0x4005]);
        infallible(target.append_compressed_name(&name("far.example")));
        let second = target.as_slice().len();
        infallible(target.append_compressed_name(&name("far.example")));

        // The first copy sits beyond what a pointer can reach, so the
        // second one has to be written out in full again.
        assert_eq!(&target.as_slice()[second..], b"\x03far\x07example\x00");
        let data = target.into_target();
        let mut parser = Parser::from_ref(data.as_slice());
        parser.advance(second).unwrap();
        assert_eq!(Name::parse(&mut parser).unwrap(), name("far.example"));
    }

    #[test]
    fn truncate_forgets() {
        let mut target = Compressor::new(Vec::new());
        infallible(target.append_compressed_name(&name("a.example")));
        target.truncate(0);
        infallible(target.append_compressed_name(&name("b.example")));
        assert_eq!(target.as_slice(), b"\x01b\x07example\x00".as_slice());
    }

    #[test]
    fn root_and_plain_composing() {
        let mut target = Compressor::new(Vec::new());
        infallible(target.append_compressed_name(&Name::root()));
        infallible(name("example").compose(&mut target));
        infallible(target.append_compressed_name(&name("example")));
        // Plain composing doesn’t register the name.
        assert_eq!(
            target.as_slice(),
            b"\x00\x07example\x00\x07example\x00".as_slice()
        );
    }
}
