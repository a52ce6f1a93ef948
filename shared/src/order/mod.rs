//! Order domain types
//!
//! - **types**: persistent order shapes (`Order`, `OrderItem`, status/kind enums)
//! - **bill**: ephemeral computed shapes (`ConsolidatedBill`, `FinalAmounts`)
//! - **dto**: request/response payloads for the staff-facing API

pub mod bill;
pub mod dto;
pub mod types;

pub use bill::{BillLine, ConsolidatedBill, FinalAmounts, SettlementOptions};
pub use dto::{
    CloseTableRequest, CloseTableResponse, CreateOrderRequest, OrderItemInput, TransitionRequest,
};
pub use types::{CustomerInfo, Order, OrderItem, OrderKind, OrderStatus};
