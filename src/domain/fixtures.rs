//! crm_mon XML builders shared by the domain tests.

pub struct NodeXml<'a> {
    pub name: &'a str,
    pub online: bool,
    pub standby: bool,
    pub maintenance: bool,
    pub unclean: bool,
}

impl<'a> NodeXml<'a> {
    pub fn healthy(name: &'a str) -> Self {
        Self {
            name,
            online: true,
            standby: false,
            maintenance: false,
            unclean: false,
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<node name="{}" id="{}" online="{}" standby="{}" standby_onfail="false" maintenance="{}" pending="false" unclean="{}" shutdown="false" expected_up="true" is_dc="false" resources_running="1" type="member"/>"#,
            self.name, self.name, self.online, self.standby, self.maintenance, self.unclean
        )
    }
}

pub struct ResourceXml<'a> {
    pub id: &'a str,
    pub role: &'a str,
    pub active: bool,
    pub failed: bool,
    pub failure_ignored: bool,
    pub managed: bool,
    pub agent: &'a str,
    pub node: Option<&'a str>,
}

impl<'a> ResourceXml<'a> {
    pub fn started(id: &'a str, node: &'a str) -> Self {
        Self {
            id,
            role: "Started",
            active: true,
            failed: false,
            failure_ignored: false,
            managed: true,
            agent: "ocf::heartbeat:IPaddr2",
            node: Some(node),
        }
    }

    pub fn stonith(id: &'a str, agent: &'a str, node: &'a str) -> Self {
        Self {
            agent,
            ..Self::started(id, node)
        }
    }

    pub fn render(&self) -> String {
        let attrs = format!(
            r#"id="{}" resource_agent="{}" role="{}" active="{}" orphaned="false" blocked="false" managed="{}" failed="{}" failure_ignored="{}" nodes_running_on="{}""#,
            self.id,
            self.agent,
            self.role,
            self.active,
            self.managed,
            self.failed,
            self.failure_ignored,
            usize::from(self.node.is_some())
        );
        match self.node {
            Some(node) => format!(
                r#"<resource {attrs}><node name="{node}" id="{node}" cached="true"/></resource>"#
            ),
            None => format!("<resource {attrs}/>"),
        }
    }
}

pub fn clone_xml(
    id: &str,
    failed: bool,
    failure_ignored: Option<&str>,
    managed: bool,
    members: &[ResourceXml<'_>],
) -> String {
    let ignored = failure_ignored
        .map(|v| format!(r#" failure_ignored="{v}""#))
        .unwrap_or_default();
    let body: String = members.iter().map(ResourceXml::render).collect();
    format!(
        r#"<clone id="{id}" multi_state="false" unique="false" managed="{managed}" failed="{failed}"{ignored}>{body}</clone>"#
    )
}

/// History for one resource on one node: `(task, rc)` per operation.
pub fn history_xml(node: &str, resource: &str, ops: &[(&str, i64)]) -> String {
    let ops: String = ops
        .iter()
        .enumerate()
        .map(|(call, (task, rc))| {
            format!(
                r#"<operation_history call="{call}" task="{task}" last-rc-change="Sun Oct 18 09:00:00 2026" last-run="Sun Oct 18 09:00:00 2026" exec-time="10ms" queue-time="0ms" rc="{rc}" rc_text="x"/>"#
            )
        })
        .collect();
    format!(
        r#"<node name="{node}"><resource_history id="{resource}" orphan="false" migration-threshold="1000000">{ops}</resource_history></node>"#
    )
}

pub struct ClusterXml {
    pub configured: usize,
    pub stonith_enabled: bool,
    pub nodes: Vec<String>,
    pub resources: Vec<String>,
    pub history: Vec<String>,
}

impl ClusterXml {
    /// A cluster of healthy nodes, each carrying one started resource.
    pub fn healthy(names: &[&str]) -> Self {
        Self {
            configured: names.len(),
            stonith_enabled: true,
            nodes: names.iter().map(|n| NodeXml::healthy(n).render()).collect(),
            resources: names
                .iter()
                .map(|n| ResourceXml::started(&format!("vip-{n}"), n).render())
                .collect(),
            history: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<?xml version="1.0"?>
<crm_mon version="2.0.5">
  <summary>
    <stack type="corosync"/>
    <nodes_configured number="{}"/>
    <resources_configured number="{}" disabled="0" blocked="0"/>
    <cluster_options stonith-enabled="{}" symmetric-cluster="true" no-quorum-policy="stop" maintenance-mode="false"/>
  </summary>
  <nodes>{}</nodes>
  <resources>{}</resources>
  <node_history>{}</node_history>
</crm_mon>"#,
            self.configured,
            self.resources.len(),
            self.stonith_enabled,
            self.nodes.concat(),
            self.resources.concat(),
            self.history.concat()
        )
    }
}
