use std::sync::LazyLock;

use regex::Regex;

static TX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0x)?[0-9a-fA-F]{64}$").expect("valid regex"));
static CONTRACT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^S[0-9A-Za-z]+\.[a-zA-Z][a-zA-Z0-9\-_]*$").expect("valid regex")
});

/// What a user-supplied decoder input refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Normalized to carry the `0x` prefix.
    Transaction(String),
    Contract(String),
    Unknown,
}

pub fn classify_input(input: &str) -> InputKind {
    let input = input.trim();
    if TX_ID.is_match(input) {
        let tx_id = if input.starts_with("0x") {
            input.to_string()
        } else {
            format!("0x{}", input)
        };
        InputKind::Transaction(tx_id)
    } else if CONTRACT_ID.is_match(input) {
        InputKind::Contract(input.to_string())
    } else {
        InputKind::Unknown
    }
}

/// Split `<address>.<name>`.
pub fn split_contract_id(contract_id: &str) -> Option<(&str, &str)> {
    contract_id
        .split_once('.')
        .filter(|(address, name)| !address.is_empty() && !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX: &str = "0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f9";

    #[test]
    fn test_transaction_ids() {
        assert_eq!(classify_input(&format!("0x{}", TX)), InputKind::Transaction(format!("0x{}", TX)));
        assert_eq!(classify_input(TX), InputKind::Transaction(format!("0x{}", TX)));
        assert_eq!(classify_input(&format!("0x{}", &TX[..63])), InputKind::Unknown);
    }

    #[test]
    fn test_contract_ids() {
        let id = "SP2C2YFP12AJZB4MABJBAJ55XECVS7E4PMMZ89YZR.arkadiko-token";
        assert_eq!(classify_input(id), InputKind::Contract(id.to_string()));
        assert_eq!(classify_input(&format!("  {}  ", id)), InputKind::Contract(id.to_string()));
        assert_eq!(classify_input("SP123.9lives"), InputKind::Unknown);
        assert_eq!(classify_input("0xabc.token"), InputKind::Unknown);
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(classify_input(""), InputKind::Unknown);
        assert_eq!(classify_input("hello world"), InputKind::Unknown);
    }

    #[test]
    fn test_split_contract_id() {
        assert_eq!(split_contract_id("SP000.token"), Some(("SP000", "token")));
        assert_eq!(split_contract_id("SP000"), None);
        assert_eq!(split_contract_id(".token"), None);
    }
}
