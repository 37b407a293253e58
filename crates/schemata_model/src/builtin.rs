//! The hard-coded bootstrap schema.
//!
//! This is the minimal meta-schema needed to read the base-language document,
//! which re-declares the same meta-types in the schema language itself. It is
//! never used for user documents directly.

use std::sync::Arc;

use schemata_foundation::Name;

use crate::context::SchemaContext;
use crate::definition::{IdentifierDefinition, ItemDefinition, TypeDefinition};
use crate::names::{items, spaces, types};

fn item(name: &Name, ty: &Name) -> ItemDefinition {
    ItemDefinition::new(name.clone(), ty.clone())
}

fn single(name: &Name, ty: &Name) -> ItemDefinition {
    item(name, ty).with_max_occurs(Some(1))
}

/// Builds the bootstrap schema context.
#[must_use]
pub fn bootstrap() -> SchemaContext {
    let string = Arc::new(TypeDefinition::new(types::STRING.clone()));
    let uuid = Arc::new(TypeDefinition::new(types::UUID.clone()));
    let identifier = Arc::new(TypeDefinition::new(types::IDENTIFIER.clone()));

    let reference_name = Arc::new(single(&items::NAME, &types::IDENTIFIER).required());
    let type_reference = Arc::new(
        TypeDefinition::new(types::TYPE_REFERENCE.clone())
            .with_item(Arc::clone(&reference_name))
            .with_argument(reference_name),
    );

    let base_name = Arc::new(single(&items::NAME, &types::IDENTIFIER).required());
    let base = Arc::new(
        TypeDefinition::new(types::BASE_DEFINITION.clone())
            .with_item(Arc::clone(&base_name))
            .with_item(single(&items::DOCUMENTATION, &types::STRING))
            .with_argument(base_name),
    );

    let model = Arc::new(
        TypeDefinition::new(types::MODEL.clone())
            .with_supertype(Arc::clone(&base))
            .with_item(single(&items::NAMESPACE, &types::STRING))
            .with_item(single(&items::VERSION, &types::STRING))
            .with_item(
                item(&items::TYPE, &types::TYPE_DEFINITION).with_identifier(
                    IdentifierDefinition::global(spaces::TYPES.clone(), items::NAME.clone()),
                ),
            )
            .with_item(
                item(&items::ROOT, &types::ROOT_DEFINITION).with_identifier(
                    IdentifierDefinition::global(spaces::ROOTS.clone(), items::NAME.clone()),
                ),
            ),
    );

    let type_definition = Arc::new(
        TypeDefinition::new(types::TYPE_DEFINITION.clone())
            .with_supertype(Arc::clone(&base))
            .with_item(single(&items::ARGUMENT, &types::IDENTIFIER))
            .with_item(single(&items::SUPERTYPE, &types::TYPE_REFERENCE))
            .with_item(
                item(&items::ITEM, &types::ITEM_DEFINITION).with_identifier(
                    IdentifierDefinition::parent(spaces::ITEMS.clone(), items::NAME.clone()),
                ),
            )
            .with_item(item(&items::IDENTIFIER, &types::IDENTIFIER_DEFINITION)),
    );

    let item_definition = Arc::new(
        TypeDefinition::new(types::ITEM_DEFINITION.clone())
            .with_supertype(Arc::clone(&base))
            .with_item(single(&items::TYPE, &types::TYPE_REFERENCE).required())
            .with_item(single(&items::IDENTIFIER, &types::IDENTIFIER_DEFINITION))
            .with_item(single(&items::MIN_OCCURS, &types::STRING))
            .with_item(single(&items::MAX_OCCURS, &types::STRING))
            .with_item(single(&items::OPERATIONAL, &types::STRING)),
    );

    let root_definition = Arc::new(
        TypeDefinition::new(types::ROOT_DEFINITION.clone())
            .with_supertype(Arc::clone(&item_definition)),
    );

    let key = Arc::new(item(&items::KEY, &types::IDENTIFIER).required());
    let identifier_definition = Arc::new(
        TypeDefinition::new(types::IDENTIFIER_DEFINITION.clone())
            .with_item(Arc::clone(&key))
            .with_item(single(&items::SCOPE, &types::STRING).required())
            .with_item(single(&items::SPACE, &types::IDENTIFIER).required())
            .with_argument(key),
    );

    SchemaContext::builder()
        .with_type(string)
        .with_type(uuid)
        .with_type(identifier)
        .with_type(type_reference)
        .with_type(base)
        .with_type(model)
        .with_type(type_definition)
        .with_type(item_definition)
        .with_type(root_definition)
        .with_type(identifier_definition)
        .with_root(item(&items::MODEL, &types::MODEL))
        .build()
}
