//! Entity references attached to emitted primitives

/// Reference to a logical source entity; the backend never owns the entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Entity handle in the source document
    pub handle: String,
    /// Entity type name, e.g. "LINE", "TEXT", "MTEXT"
    pub dxftype: String,
}

impl EntityRef {
    pub fn new(handle: impl Into<String>, dxftype: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            dxftype: dxftype.into(),
        }
    }
}

/// Reverse-lookup data of one primitive: the entity being drawn and the
/// entities it is nested in, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityTag {
    pub entity: Option<EntityRef>,
    pub parents: Vec<EntityRef>,
}

impl EntityTag {
    /// Tag for the top of `stack`; the parents are all frames below it
    pub fn from_stack(stack: &[EntityRef]) -> Self {
        match stack.split_last() {
            Some((entity, parents)) => Self {
                entity: Some(entity.clone()),
                parents: parents.to_vec(),
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_excludes_entity_from_parents() {
        let stack = [
            EntityRef::new("1A", "INSERT"),
            EntityRef::new("2B", "INSERT"),
            EntityRef::new("3C", "LINE"),
        ];
        let tag = EntityTag::from_stack(&stack);
        assert_eq!(tag.entity, Some(EntityRef::new("3C", "LINE")));
        assert_eq!(tag.parents, stack[..2].to_vec());
    }

    #[test]
    fn test_empty_stack() {
        assert_eq!(EntityTag::from_stack(&[]), EntityTag::default());
    }
}
