use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("field {field} must not be empty")]
    EmptyField { field: String },

    #[error("participant {participant} is already registered for event {event}")]
    AlreadyRegistered { event: String, participant: String },
}
