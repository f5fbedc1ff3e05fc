//! Serializers for ontology and instance graphs.
//!
//! Only **N-Triples** ([`ntriples`]) is written: it is the exchange format
//! handed to external constraint validators.

pub mod ntriples;
