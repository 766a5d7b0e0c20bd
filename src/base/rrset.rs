//! Sets of resource records.
//!
//! A [`RecordSet`] is a sequence of records with set operations on top.
//! Set membership uses record equality which ignores the TTL and compares
//! domain names ignoring ASCII case. A [`Partition`] groups the records of
//! a set by their record type.

use super::iana::Rtype;
use super::record::Record;
use super::wire::{Composer, ParseError};
use core::fmt;
use octseq::parse::Parser;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::vec::Vec;

//------------ RecordSet -----------------------------------------------------

/// A sequence of resource records.
///
/// The order of records carries no meaning for the set operations but is
/// preserved by all of them. A set only is free of duplicates after
/// [`unique`][Self::unique] or if it was only ever grown through
/// [`set_add`][Self::set_add].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates a new, empty record set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record regardless of whether it is already present.
    pub fn push(&mut self, record: Record) {
        self.records.push(record)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> core::slice::Iter<Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Record> {
        self.records
    }

    /// Adds all records of `other` that aren’t present yet.
    ///
    /// Records are appended in the order they appear in `other`. A record
    /// is present if an equal record is already in the set, including one
    /// added earlier from `other`.
    pub fn set_add(&mut self, other: impl IntoIterator<Item = Record>) {
        for record in other {
            if !self.records.contains(&record) {
                self.records.push(record)
            }
        }
    }

    /// Removes all records equal to an earlier record.
    ///
    /// The first occurence of each record is kept in place.
    pub fn unique(&mut self) {
        let records = core::mem::take(&mut self.records);
        self.set_add(records)
    }

    /// Groups the records by their record type.
    ///
    /// If `unique` is `true`, each group is deduplicated.
    #[must_use]
    pub fn partition(self, unique: bool) -> Partition {
        let mut res = Partition::new();
        for record in self.records {
            res.parts.entry(record.rtype()).or_default().push(record);
        }
        if unique {
            for set in res.parts.values_mut() {
                set.unique()
            }
        }
        res
    }

    /// Splits the set into the records `want` returns `true` for and all
    /// others.
    ///
    /// Both sets keep the relative order of their records.
    #[must_use]
    pub fn filter(
        self,
        mut want: impl FnMut(&Record) -> bool,
    ) -> (RecordSet, RecordSet) {
        let (wanted, other) =
            self.records.into_iter().partition(|record| want(record));
        (RecordSet { records: wanted }, RecordSet { records: other })
    }

    /// Appends the wire format of all records to `target`.
    ///
    /// Names are compressed if `target` supports it.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for record in &self.records {
            record.compose(target)?
        }
        Ok(())
    }

    /// Returns the records in wire format.
    ///
    /// The records are concatenated and share name compression.
    #[cfg(feature = "bytes")]
    #[must_use]
    pub fn pack(&self) -> bytes::Bytes {
        let mut target = super::compress::Compressor::new(
            bytes::BytesMut::new(),
        );
        octseq::builder::infallible(self.compose(&mut target));
        tracing::trace!(
            records = self.records.len(),
            len = target.as_slice().len(),
            "packed record set"
        );
        target.into_target().freeze()
    }

    /// Parses a sequence of records filling all of `data`.
    pub fn unpack(data: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(data);
        let mut records = Vec::new();
        while parser.remaining() > 0 {
            records.push(Record::parse(&mut parser)?);
        }
        Ok(RecordSet { records })
    }
}

//--- From, FromIterator, and Extend

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        RecordSet { records }
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        RecordSet {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for RecordSet {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter)
    }
}

//--- IntoIterator

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//--- Display

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut records = self.records.iter();
        if let Some(record) = records.next() {
            record.fmt(f)?;
        }
        for record in records {
            write!(f, "\n{}", record)?;
        }
        Ok(())
    }
}

//------------ Partition -----------------------------------------------------

/// Record sets grouped by record type.
///
/// Iteration happens in order of the record type value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Partition {
    parts: BTreeMap<Rtype, RecordSet>,
}

impl Partition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record set for the given type if there is one.
    #[must_use]
    pub fn get(&self, rtype: Rtype) -> Option<&RecordSet> {
        self.parts.get(&rtype)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<Rtype, RecordSet> {
        self.parts.iter()
    }

    /// Merges another partition into this one.
    ///
    /// Sets for types not present yet are taken as they are. Sets for types
    /// already present are merged via [`RecordSet::set_add`].
    pub fn set_add(&mut self, other: Partition) {
        for (rtype, set) in other.parts {
            match self.parts.entry(rtype) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(set);
                }
                btree_map::Entry::Occupied(mut entry) => {
                    entry.get_mut().set_add(set)
                }
            }
        }
    }

    /// Flattens the partition back into a single set.
    #[must_use]
    pub fn join(self) -> RecordSet {
        self.parts.into_values().flatten().collect()
    }
}

//--- IntoIterator

impl IntoIterator for Partition {
    type Item = (Rtype, RecordSet);
    type IntoIter = btree_map::IntoIter<Rtype, RecordSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = (&'a Rtype, &'a RecordSet);
    type IntoIter = btree_map::Iter<'a, Rtype, RecordSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

//============ Testing =======================================================
