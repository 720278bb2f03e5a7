pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_counts() {
        let h = types::Health { status: "ok", parents: 2, children: 1, admins: 0 };
        assert_eq!(
            serde_json::to_value(&h).unwrap(),
            serde_json::json!({"status": "ok", "parents": 2, "children": 1, "admins": 0})
        );
    }
}
