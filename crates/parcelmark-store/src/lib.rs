//! Parcelmark Store - Record storage port and the session polygon store
//!
//! This crate defines the storage port for committed polygon records, an
//! in-memory adapter, and [`PolygonStore`], which turns drawn rings into
//! named drafts and keeps the committed ones in insertion order.

pub mod memory;
pub mod polygon_store;
pub mod ports;

pub use memory::MemoryRecordStore;
pub use polygon_store::PolygonStore;
pub use ports::RecordStore;
