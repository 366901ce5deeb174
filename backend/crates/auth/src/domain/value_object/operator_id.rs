use kernel::id::Id;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorMarker;
pub type OperatorId = Id<OperatorMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_id_new() {
        let operator_id = OperatorId::new();
        let uuid = operator_id.as_uuid();
        assert_eq!(uuid.get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let operator_id = OperatorId::from_uuid(uuid);
        assert_eq!(operator_id.as_uuid(), &uuid);
    }
}
