//! BRP handlers for listing, reading and writing forged properties

use bevy::prelude::*;
use bevy::remote::error_codes::{INTERNAL_ERROR, INVALID_PARAMS};
use bevy::remote::{BrpError, BrpResult};
use export_forge::{PropertyInfo, Variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::ForgedProperties;

#[derive(Debug, Deserialize)]
struct ListPropertiesRequest {
    entity: u64,
}

#[derive(Debug, Serialize)]
struct ListPropertiesResponse {
    entity:     u64,
    properties: Vec<PropertyInfo>,
}

#[derive(Debug, Deserialize)]
struct GetPropertyRequest {
    entity: u64,
    name:   String,
}

#[derive(Debug, Serialize)]
struct GetPropertyResponse {
    entity: u64,
    name:   String,
    value:  Value,
}

#[derive(Debug, Deserialize)]
struct SetPropertyRequest {
    entity: u64,
    name:   String,
    value:  Value,
}

#[derive(Debug, Serialize)]
struct SetPropertyResponse {
    entity:  u64,
    name:    String,
    handled: bool,
}

/// Parse BRP request parameters into a typed request
///
/// # Returns
/// Parsed request struct or BRP error with `INVALID_PARAMS` code
fn parse_request<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, BrpError> {
    let params = params.ok_or_else(|| BrpError {
        code:    INVALID_PARAMS,
        message: "Missing request parameters".to_string(),
        data:    None,
    })?;

    serde_json::from_value(params).map_err(|e| BrpError {
        code:    INVALID_PARAMS,
        message: format!("Failed to parse parameters: {e}"),
        data:    None,
    })
}

/// Serialize BRP response with standardized error handling
///
/// # Returns
/// Serialized JSON value or BRP error with `INTERNAL_ERROR` code
fn serialize_response<T: Serialize>(response: T, handler_name: &str) -> BrpResult {
    serde_json::to_value(response).map_err(|e| {
        warn!("Failed to serialize {handler_name} response: {e}");
        BrpError {
            code:    INTERNAL_ERROR,
            message: format!("Failed to serialize response: {e}"),
            data:    None,
        }
    })
}

fn resolve_entity(world: &World, id: u64) -> Result<Entity, BrpError> {
    let entity = Entity::from_bits(id);
    if world.get_entity(entity).is_err() {
        return Err(BrpError {
            code:    INVALID_PARAMS,
            message: format!("Invalid entity: {id}"),
            data:    None,
        });
    }
    Ok(entity)
}

fn missing_component(id: u64) -> BrpError {
    BrpError {
        code:    INVALID_PARAMS,
        message: format!("Entity {id} has no ForgedProperties component"),
        data:    None,
    }
}

fn forged(world: &World, id: u64) -> Result<&ForgedProperties, BrpError> {
    let entity = resolve_entity(world, id)?;
    world
        .get::<ForgedProperties>(entity)
        .ok_or_else(|| missing_component(id))
}

/// Handler for `list_properties` requests
pub fn list_properties_handler(In(params): In<Option<Value>>, world: &mut World) -> BrpResult {
    let request: ListPropertiesRequest = parse_request(params)?;
    let properties = forged(world, request.entity)?.registry().list_all();

    serialize_response(
        ListPropertiesResponse {
            entity: request.entity,
            properties,
        },
        "list_properties",
    )
}

/// Handler for `get_property` requests
pub fn get_property_handler(In(params): In<Option<Value>>, world: &mut World) -> BrpResult {
    let request: GetPropertyRequest = parse_request(params)?;
    let value = forged(world, request.entity)?
        .registry()
        .read(&request.name)
        .to_json();

    serialize_response(
        GetPropertyResponse {
            entity: request.entity,
            name: request.name,
            value,
        },
        "get_property",
    )
}

/// Handler for `set_property` requests
pub fn set_property_handler(In(params): In<Option<Value>>, world: &mut World) -> BrpResult {
    let request: SetPropertyRequest = parse_request(params)?;
    let value = Variant::from_json(&request.value).ok_or_else(|| BrpError {
        code:    INVALID_PARAMS,
        message: format!("Cannot decode value for '{}'", request.name),
        data:    None,
    })?;

    let entity = resolve_entity(world, request.entity)?;
    let mut forged = world
        .get_mut::<ForgedProperties>(entity)
        .ok_or_else(|| missing_component(request.entity))?;
    let handled = forged.registry_mut().write(&request.name, &value);
    if !handled {
        warn!(
            "set_property '{}' on entity {} was not handled",
            request.name, request.entity
        );
    }

    serialize_response(
        SetPropertyResponse {
            entity: request.entity,
            name: request.name,
            handled,
        },
        "set_property",
    )
}
