//! Shared types for the Comanda order engine
//!
//! Common types used across the server and its clients: order models,
//! consolidated bill shapes, and request/response DTOs.

pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use order::{
    BillLine, CloseTableRequest, CloseTableResponse, ConsolidatedBill, CreateOrderRequest,
    FinalAmounts, Order, OrderItem, OrderKind, OrderStatus, SettlementOptions, TransitionRequest,
};
