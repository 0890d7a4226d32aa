//! Refund handling.
//!
//! A refund request is parsed into a [`ParsedRefundEvent`], mapped to a
//! [`RefundStrategy`] and executed by the orchestrator matching the order's
//! fulfillment phase.

pub mod goods;
pub mod orchestrator;
pub mod parser;
pub mod use_case;

pub use goods::{
    AfterFulfillment, BeforeFulfillment, FulfillmentPhase, RefundStrategy, itemized_goods,
    refund_adjustment_goods,
};
pub use orchestrator::{
    AfterFulfillmentRefundOrchestrator, BeforeFulfillmentRefundOrchestrator, RefundOrchestrator,
};
pub use parser::{ParsedRefundEvent, parse_refund_event};
pub use use_case::TransactionRefundRequestedUseCase;
