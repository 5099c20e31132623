pub mod lead;
pub mod stage;

pub use lead::{Installment, Invoice, Lead};
pub use stage::{ClientType, DemoDay, LostReason, PaymentStage, PipelineStage, RibType};
