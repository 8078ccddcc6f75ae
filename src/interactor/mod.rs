pub mod transaction_interactor;
pub mod transfer_interactor;

pub use transaction_interactor::{TransactionInteractor, TransactionInteractorImpl};
pub use transfer_interactor::{TransferInteractor, TransferInteractorImpl};
