//! Builds a `Snapshot` from crm_mon XML.
//!
//! Every field is extracted explicitly. A missing attribute or a value that
//! does not coerce to its field type fails the whole build.

use tracing::debug;

use super::snapshot::*;
use super::xml::Element;
use crate::error::SnapshotError;

/// Decode and build a snapshot from raw `crm_mon -X` output.
pub fn build(xml: &str) -> Result<Snapshot, SnapshotError> {
    let root = Element::parse(xml)?;
    from_element(&root)
}

pub fn from_element(root: &Element) -> Result<Snapshot, SnapshotError> {
    if root.name != "crm_mon" {
        return Err(SnapshotError::UnexpectedRoot(root.name.clone()));
    }

    let summary = summary(section(root, "summary")?)?;

    let mut nodes = section(root, "nodes")?
        .children_named("node")
        .map(node)
        .collect::<Result<Vec<_>, _>>()?;

    let resources_section = section(root, "resources")?;
    let resources = resources_section
        .children_named("resource")
        .map(resource)
        .collect::<Result<Vec<_>, _>>()?;
    let clones = resources_section
        .children_named("clone")
        .map(resource_clone)
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(history) = root.child("node_history") {
        for node in &mut nodes {
            if let Some(entry) = history
                .children_named("node")
                .find(|h| h.attr("name") == Some(node.name.as_str()))
            {
                node.history = node_history(entry)?;
                debug!(node = %node.name, resources = node.history.len(), "attached node history");
            }
        }
    }

    Ok(Snapshot {
        summary,
        nodes,
        resources,
        clones,
    })
}

fn section<'a>(root: &'a Element, name: &'static str) -> Result<&'a Element, SnapshotError> {
    root.child(name).ok_or(SnapshotError::MissingSection(name))
}

fn summary(el: &Element) -> Result<ClusterSummary, SnapshotError> {
    let configured = el
        .child("nodes_configured")
        .ok_or(SnapshotError::MissingSection("nodes_configured"))?;
    let options = el
        .child("cluster_options")
        .ok_or(SnapshotError::MissingSection("cluster_options"))?;

    Ok(ClusterSummary {
        nodes_configured: parse_attr(configured, "number")?,
        stonith_enabled: flag(options, "stonith-enabled")?,
    })
}

fn node(el: &Element) -> Result<Node, SnapshotError> {
    let node = Node {
        name: required(el, "name")?.to_string(),
        online: flag(el, "online")?,
        standby: flag(el, "standby")?,
        maintenance: flag(el, "maintenance")?,
        unclean: flag(el, "unclean")?,
        history: Vec::new(),
    };
    debug!(?node, "created node");
    Ok(node)
}

fn resource(el: &Element) -> Result<Resource, SnapshotError> {
    let resource = Resource {
        id: required(el, "id")?.to_string(),
        role: Role::from(required(el, "role")?),
        active: flag(el, "active")?,
        failed: flag(el, "failed")?,
        failure_ignored: flag(el, "failure_ignored")?,
        managed: flag(el, "managed")?,
        resource_agent: required(el, "resource_agent")?.to_string(),
        node: el
            .child("node")
            .and_then(|n| n.attr("name"))
            .map(str::to_string),
    };
    debug!(?resource, "created resource");
    Ok(resource)
}

/// Members are built from this clone's own children, so nothing leaks from
/// one clone into the next.
fn resource_clone(el: &Element) -> Result<ResourceClone, SnapshotError> {
    let clone = ResourceClone {
        id: required(el, "id")?.to_string(),
        failed: flag(el, "failed")?,
        failure_ignored: el.attr("failure_ignored").and_then(parse_bool),
        managed: flag(el, "managed")?,
        members: el
            .children_named("resource")
            .map(resource)
            .collect::<Result<Vec<_>, _>>()?,
    };
    debug!(id = %clone.id, members = clone.members.len(), "created clone");
    Ok(clone)
}

fn node_history(el: &Element) -> Result<Vec<ResourceHistory>, SnapshotError> {
    el.children_named("resource_history")
        .map(|rh| -> Result<ResourceHistory, SnapshotError> {
            Ok(ResourceHistory {
                resource: required(rh, "id")?.to_string(),
                operations: rh
                    .children_named("operation_history")
                    .map(operation)
                    .collect::<Result<Vec<_>, _>>()?,
            })
        })
        .collect()
}

fn operation(el: &Element) -> Result<OperationRecord, SnapshotError> {
    Ok(OperationRecord {
        task: required(el, "task")?.to_string(),
        rc: parse_attr(el, "rc")?,
        call: match el.attr("call") {
            Some(_) => Some(parse_attr(el, "call")?),
            None => None,
        },
        last_rc_change: required(el, "last-rc-change")?.to_string(),
    })
}

fn required<'a>(el: &'a Element, attribute: &'static str) -> Result<&'a str, SnapshotError> {
    el.attr(attribute)
        .ok_or_else(|| SnapshotError::MissingAttribute {
            element: el.name.clone(),
            attribute,
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn flag(el: &Element, attribute: &'static str) -> Result<bool, SnapshotError> {
    let value = required(el, attribute)?;
    parse_bool(value).ok_or_else(|| invalid(el, attribute, value))
}

fn parse_attr<T: std::str::FromStr>(
    el: &Element,
    attribute: &'static str,
) -> Result<T, SnapshotError> {
    let value = required(el, attribute)?;
    value.parse().map_err(|_| invalid(el, attribute, value))
}

fn invalid(el: &Element, attribute: &'static str, value: &str) -> SnapshotError {
    SnapshotError::InvalidValue {
        element: el.name.clone(),
        attribute,
        value: value.to_string(),
    }
}
