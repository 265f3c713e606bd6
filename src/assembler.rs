use std::convert::Infallible;
use std::sync::OnceLock;

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::TableConfig;
use crate::decode_index::{DecodeIndexBuilder, DecodeTableEntry};
use crate::encode_index::{EncodeIndexBuilder, EncodeLayout, EncodeTableEntry};
use crate::length_sum;
use crate::quadruple::{LengthQuadruple, LengthSpace, QUADRUPLE_COUNT};

/// Everything generated for a single quadruple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub quadruple: LengthQuadruple,
    pub packed_length: u8,
    pub decode: DecodeTableEntry,
    pub encode: EncodeTableEntry,
}

impl TableRecord {
    #[inline]
    pub fn index(&self) -> usize {
        self.quadruple.index()
    }
}

/// Receives generated records in table order. This is the seam for anything that persists tables:
/// source literals, binary blobs, and so on.
pub trait TableSink {
    type Error;

    /// Called once before the first record.
    fn begin(&mut self, _config: &TableConfig, _len: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every record in ascending index order.
    fn record(&mut self, record: &TableRecord) -> Result<(), Self::Error>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl TableSink for Vec<TableRecord> {
    type Error = Infallible;

    fn begin(&mut self, _config: &TableConfig, len: usize) -> Result<(), Self::Error> {
        self.reserve(len);
        Ok(())
    }

    fn record(&mut self, record: &TableRecord) -> Result<(), Self::Error> {
        self.push(*record);
        Ok(())
    }
}

/// The three aligned tables for every quadruple, indexed by `LengthQuadruple::index()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTables {
    config: TableConfig,
    lengths: Vec<u8>,
    decode: Vec<DecodeTableEntry>,
    encode: Vec<EncodeTableEntry>,
}

impl GeneratedTables {
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn encode_layout(&self) -> EncodeLayout {
        self.config.encode_layout
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn lengths(&self) -> &[u8] {
        &self.lengths
    }

    pub fn decode_entries(&self) -> &[DecodeTableEntry] {
        &self.decode
    }

    pub fn encode_entries(&self) -> &[EncodeTableEntry] {
        &self.encode
    }

    #[inline]
    pub fn packed_length(&self, q: LengthQuadruple) -> usize {
        self.lengths[q.index()] as usize
    }

    #[inline]
    pub fn decode(&self, q: LengthQuadruple) -> &DecodeTableEntry {
        &self.decode[q.index()]
    }

    #[inline]
    pub fn encode(&self, q: LengthQuadruple) -> &EncodeTableEntry {
        &self.encode[q.index()]
    }

    pub fn record(&self, q: LengthQuadruple) -> TableRecord {
        let i = q.index();
        TableRecord {
            quadruple: q,
            packed_length: self.lengths[i],
            decode: self.decode[i],
            encode: self.encode[i],
        }
    }

    /// Iterate over all records in table order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = TableRecord> + '_ {
        LengthSpace::new().map(move |q| self.record(q))
    }

    /// Hand every record, in table order, to `sink`.
    pub fn emit<S: TableSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.begin(&self.config, self.len())?;
        for record in self.records() {
            trace!("emitting record {} for {:?}", record.index(), record.quadruple);
            sink.record(&record)?;
        }
        sink.finish()
    }
}

/// Drives the length space through the length, decode and encode builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAssembler {
    config: TableConfig,
    decode: DecodeIndexBuilder,
    encode: EncodeIndexBuilder,
}

impl TableAssembler {
    pub fn new(config: TableConfig) -> Self {
        TableAssembler {
            config,
            decode: DecodeIndexBuilder,
            encode: EncodeIndexBuilder::new(config.encode_layout),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Compute the record for a single quadruple.
    pub fn record(&self, q: LengthQuadruple) -> TableRecord {
        TableRecord {
            quadruple: q,
            packed_length: length_sum::packed_length(q) as u8,
            decode: self.decode.build(q),
            encode: self.encode.build(q),
        }
    }

    /// Compute every record and collect them into aligned tables.
    pub fn assemble(&self) -> GeneratedTables {
        let records = self.compute_records();
        debug_assert_eq!(QUADRUPLE_COUNT, records.len());

        let mut lengths = Vec::with_capacity(records.len());
        let mut decode = Vec::with_capacity(records.len());
        let mut encode = Vec::with_capacity(records.len());
        for (i, r) in records.into_iter().enumerate() {
            debug_assert_eq!(i, r.index());
            lengths.push(r.packed_length);
            decode.push(r.decode);
            encode.push(r.encode);
        }
        debug!(
            "assembled {} table entries, encode layout {:?}, parallel {}",
            lengths.len(),
            self.config.encode_layout,
            self.config.runs_parallel()
        );
        GeneratedTables {
            config: self.config,
            lengths,
            decode,
            encode,
        }
    }

    /// Assemble and immediately emit to `sink`.
    pub fn assemble_into<S: TableSink>(&self, sink: &mut S) -> Result<GeneratedTables, S::Error> {
        let tables = self.assemble();
        tables.emit(sink)?;
        Ok(tables)
    }

    #[cfg(feature = "parallel")]
    fn compute_records(&self) -> Vec<TableRecord> {
        if self.config.parallel {
            (0..QUADRUPLE_COUNT)
                .into_par_iter()
                .map(|i| self.record(LengthQuadruple::from_index_unchecked(i)))
                .collect()
        } else {
            LengthSpace::new().map(|q| self.record(q)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_records(&self) -> Vec<TableRecord> {
        LengthSpace::new().map(|q| self.record(q)).collect()
    }
}

static DEFAULT_TABLES: OnceLock<GeneratedTables> = OnceLock::new();

/// Tables for the default `TableConfig`, generated on first use and shared afterwards.
pub fn tables() -> &'static GeneratedTables {
    DEFAULT_TABLES.get_or_init(|| TableAssembler::new(TableConfig::default()).assemble())
}
