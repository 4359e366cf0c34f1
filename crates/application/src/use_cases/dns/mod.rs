pub mod forward_query;
pub mod handle_dns_query;

pub use forward_query::{ForwardOutcome, ForwardQueryUseCase};
pub use handle_dns_query::HandleDnsQueryUseCase;
