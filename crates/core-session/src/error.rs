use core_hooks::ContractBreach;
use thiserror::Error;

/// Ways a session ends without a result.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("interrupted")]
    Interrupted,
    #[error("command `{trigger}` broke the reply contract: {reason}")]
    ContractViolation {
        trigger: String,
        #[source]
        reason: ContractBreach,
    },
    #[error("input closed before the prompt was confirmed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl SessionError {
    /// 128 + SIGINT.
    pub const INTERRUPT_EXIT: u8 = 130;
    /// `EX_SOFTWARE` from sysexits.
    pub const CONTRACT_EXIT: u8 = 70;

    pub fn exit_code(&self) -> u8 {
        match self {
            SessionError::Interrupted => Self::INTERRUPT_EXIT,
            SessionError::ContractViolation { .. } => Self::CONTRACT_EXIT,
            SessionError::InputClosed | SessionError::Io(_) => 1,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            SessionError::Interrupted => "interrupted",
            SessionError::ContractViolation { .. } => "contract_violation",
            SessionError::InputClosed => "input_closed",
            SessionError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_hooks::HookError;

    #[test]
    fn exit_codes() {
        assert_eq!(SessionError::Interrupted.exit_code(), 130);
        let breach = SessionError::ContractViolation {
            trigger: ":now".into(),
            reason: ContractBreach::Handler(HookError::Failed("boom".into())),
        };
        assert_eq!(breach.exit_code(), 70);
        assert_eq!(
            breach.to_string(),
            "command `:now` broke the reply contract: handler failed: boom"
        );
        assert_eq!(SessionError::InputClosed.exit_code(), 1);
        assert_eq!(SessionError::Io(anyhow::anyhow!("tty gone")).exit_code(), 1);
    }
}
