// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line front-end for grid management.
//!
//! Each subcommand maps onto one [`ObjectManipulator`] operation and prints
//! its result as pretty JSON on stdout.

use crate::connector::{Connector, ConnectorOptions, WapiConnector};
use crate::constants::{
    DEFAULT_HWTYPE, DEFAULT_MEMBER_PLATFORM, ENV_HOST, ENV_PASSWORD, ENV_USERNAME,
};
use crate::manipulator::ObjectManipulator;
use crate::resource_utils::port_schema;
use crate::types::{InterfaceSettings, MemberSpec, Record};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_TSIG_ALGORITHM: &str = "hmac-md5";

#[derive(Parser, Debug)]
#[command(name = "ibgrid", version, about = "Manage Infoblox grid objects over WAPI")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Grid master connection settings.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// YAML connector configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[arg(long, env = ENV_HOST)]
    pub host: Option<String>,

    #[arg(long, env = ENV_USERNAME)]
    pub username: Option<String>,

    #[arg(long, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long)]
    pub wapi_version: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Create per-tenant network and DNS views
    #[arg(long)]
    pub multi_tenant: bool,
}

impl ConnectionArgs {
    /// Merge the configuration file with command line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn options(&self) -> Result<ConnectorOptions> {
        let mut options = match &self.config {
            Some(path) => ConnectorOptions::from_yaml_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => ConnectorOptions::default(),
        };

        if let Some(host) = &self.host {
            options.host.clone_from(host);
        }
        if let Some(username) = &self.username {
            options.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            options.password.clone_from(password);
        }
        if let Some(wapi_version) = &self.wapi_version {
            options.wapi_version.clone_from(wapi_version);
        }
        if self.insecure {
            options.ssl_verify = false;
        }
        if self.multi_tenant {
            options.multi_tenant = true;
        }

        Ok(options)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grid members
    #[command(subcommand)]
    Member(MemberCommand),

    /// Anycast loopback addresses
    #[command(subcommand)]
    Anycast(AnycastCommand),

    /// OSPF areas on members
    #[command(subcommand)]
    Ospf(OspfCommand),

    /// Name server groups
    #[command(subcommand, name = "nsgroup")]
    NsGroup(NsGroupCommand),

    /// Network and DNS views
    #[command(subcommand)]
    View(ViewCommand),

    /// TSIG keys
    #[command(subcommand)]
    Tsig(TsigCommand),

    /// Authoritative zones
    #[command(subcommand)]
    Zone(ZoneCommand),

    /// Orchestration property schemas
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    Get {
        name: String,
        #[arg(long, value_delimiter = ',')]
        return_fields: Vec<String>,
    },

    Create {
        name: String,
        #[arg(long, default_value = DEFAULT_MEMBER_PLATFORM)]
        platform: String,
        /// LAN1 settings as JSON, e.g. '{"ipv4": {"address": ..., "subnet_mask": ...}}'
        #[arg(long, value_parser = parse_interface)]
        lan1: Option<InterfaceSettings>,
        #[arg(long, value_parser = parse_interface)]
        lan2: Option<InterfaceSettings>,
        #[arg(long, value_parser = parse_interface)]
        mgmt: Option<InterfaceSettings>,
        #[arg(long)]
        nat_ip: Option<String>,
    },

    Delete {
        name: String,
    },

    PreProvision {
        name: String,
        #[arg(long)]
        hwmodel: Option<String>,
        #[arg(long, default_value = DEFAULT_HWTYPE)]
        hwtype: String,
        #[arg(long = "license")]
        licenses: Vec<String>,
    },

    /// Enable or disable the DNS service of a member
    Dns {
        name: String,
        #[arg(long)]
        disable: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnycastCommand {
    Add {
        member: String,
        ip: String,
        #[arg(long)]
        bgp: bool,
        #[arg(long)]
        ospf: bool,
    },

    /// Remove an address from one member, or from every member when none is given
    Remove {
        ip: String,
        #[arg(long)]
        member: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OspfCommand {
    Add {
        member: String,
        /// OSPF area settings as a JSON object
        #[arg(value_parser = parse_record)]
        options: Record,
    },

    Remove {
        member: String,
        area_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NsGroupCommand {
    List {
        #[arg(long, value_delimiter = ',')]
        return_fields: Vec<String>,
    },

    Get {
        name: String,
        #[arg(long, value_delimiter = ',')]
        return_fields: Vec<String>,
    },

    Update {
        name: String,
        /// Fields to replace, as a JSON object
        #[arg(value_parser = parse_record)]
        fields: Record,
    },
}

#[derive(Subcommand, Debug)]
pub enum ViewCommand {
    CreateDns {
        network_view: String,
        dns_view: String,
    },

    DeleteDns {
        name: String,
    },

    CreateNetwork {
        name: String,
        tenant: String,
    },

    DeleteNetwork {
        name: String,
    },

    /// Create the network and DNS views of a tenant
    MultiTenant {
        tenant: String,
        #[arg(long)]
        network_view: Option<String>,
    },

    /// Print the DNS view a tenant's zones belong to
    Resolve {
        tenant: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TsigCommand {
    Create {
        name: String,
        secret: String,
        #[arg(long, default_value = DEFAULT_TSIG_ALGORITHM)]
        algorithm: String,
    },

    Delete {
        name: String,
        secret: String,
        #[arg(long, default_value = DEFAULT_TSIG_ALGORITHM)]
        algorithm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    Create {
        fqdn: String,
        /// DNS view; defaults to the configured one
        #[arg(long)]
        view: Option<String>,
    },

    Delete {
        fqdn: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    Port {
        name: String,
        #[arg(long)]
        required: bool,
    },
}

fn parse_interface(value: &str) -> std::result::Result<InterfaceSettings, String> {
    serde_json::from_str(value).map_err(|e| format!("invalid interface settings: {e}"))
}

fn parse_record(value: &str) -> std::result::Result<Record, String> {
    serde_json::from_str(value).map_err(|e| format!("expected a JSON object: {e}"))
}

fn fields_ref(fields: &[String]) -> Vec<&str> {
    fields.iter().map(String::as_str).collect()
}

fn non_empty<'a>(fields: &'a [&'a str]) -> Option<&'a [&'a str]> {
    (!fields.is_empty()).then_some(fields)
}

/// Run a parsed command line and print its result.
///
/// # Errors
///
/// Returns an error if the connector cannot be built or the operation fails.
pub async fn run(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Command::Schema(SchemaCommand::Port { name, required }) => {
            serde_json::to_value(port_schema(&name, required))?
        }
        command => {
            let options = cli.connection.options()?;
            debug!(
                host = %options.host,
                wapi_version = %options.wapi_version,
                "Connecting to grid master"
            );
            let connector =
                WapiConnector::new(options).context("Failed to create WAPI connector")?;
            execute(&ObjectManipulator::new(connector), command).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Execute one grid command and return its JSON result.
///
/// # Errors
///
/// Returns an error if the operation fails.
pub async fn execute<C: Connector>(
    manipulator: &ObjectManipulator<C>,
    command: Command,
) -> Result<Value> {
    let value = match command {
        Command::Member(command) => match command {
            MemberCommand::Get {
                name,
                return_fields,
            } => {
                let fields = fields_ref(&return_fields);
                json!(manipulator.get_member(&name, non_empty(&fields), None).await?)
            }
            MemberCommand::Create {
                name,
                platform,
                lan1,
                lan2,
                mgmt,
                nat_ip,
            } => {
                let spec = MemberSpec {
                    platform,
                    lan1: lan1.unwrap_or_default(),
                    lan2,
                    mgmt,
                    nat_ip,
                    ..MemberSpec::new(name)
                };
                json!(manipulator.create_member(&spec).await?)
            }
            MemberCommand::Delete { name } => json!(manipulator.delete_member(&name).await?),
            MemberCommand::PreProvision {
                name,
                hwmodel,
                hwtype,
                licenses,
            } => json!(
                manipulator
                    .pre_provision_member(&name, hwmodel.as_deref(), &hwtype, &licenses)
                    .await?
            ),
            MemberCommand::Dns { name, disable } => {
                json!(manipulator.configure_member_dns(&name, !disable).await?)
            }
        },

        Command::Anycast(command) => match command {
            AnycastCommand::Add {
                member,
                ip,
                bgp,
                ospf,
            } => json!(
                manipulator
                    .create_anycast_loopback(&member, &ip, bgp, ospf)
                    .await?
            ),
            AnycastCommand::Remove { ip, member } => {
                let updated = manipulator
                    .delete_anycast_loopback(&ip, member.as_deref())
                    .await?;
                json!({ "updated_members": updated })
            }
        },

        Command::Ospf(command) => match command {
            OspfCommand::Add { member, options } => {
                json!(manipulator.create_ospf(&member, options).await?)
            }
            OspfCommand::Remove { member, area_id } => {
                json!(manipulator.delete_ospf(&area_id, &member).await?)
            }
        },

        Command::NsGroup(command) => match command {
            NsGroupCommand::List { return_fields } => {
                let fields = fields_ref(&return_fields);
                json!(manipulator.get_all_ns_groups(non_empty(&fields), None).await?)
            }
            NsGroupCommand::Get {
                name,
                return_fields,
            } => {
                let fields = fields_ref(&return_fields);
                json!(
                    manipulator
                        .get_ns_group(&name, non_empty(&fields), None)
                        .await?
                )
            }
            NsGroupCommand::Update { name, fields } => {
                json!(manipulator.update_ns_group(&name, &fields).await?)
            }
        },

        Command::View(command) => match command {
            ViewCommand::CreateDns {
                network_view,
                dns_view,
            } => json!(manipulator.create_dns_view(&network_view, &dns_view).await?),
            ViewCommand::DeleteDns { name } => json!(manipulator.delete_dns_view(&name).await?),
            ViewCommand::CreateNetwork { name, tenant } => {
                json!(manipulator.create_network_view(&name, &tenant).await?)
            }
            ViewCommand::DeleteNetwork { name } => {
                json!(manipulator.delete_network_view(&name).await?)
            }
            ViewCommand::MultiTenant {
                tenant,
                network_view,
            } => json!(
                manipulator
                    .create_multi_tenant_dns_view(network_view.as_deref(), &tenant)
                    .await
            ),
            ViewCommand::Resolve { tenant } => json!(manipulator.get_dns_view(&tenant).await?),
        },

        Command::Tsig(command) => match command {
            TsigCommand::Create {
                name,
                secret,
                algorithm,
            } => json!(manipulator.create_tsig(&name, &algorithm, &secret).await?),
            TsigCommand::Delete {
                name,
                secret,
                algorithm,
            } => json!(manipulator.delete_tsig(&name, &algorithm, &secret).await?),
        },

        Command::Zone(command) => match command {
            ZoneCommand::Create { fqdn, view } => {
                let view = match view {
                    Some(view) => view,
                    None => manipulator.connector().dns_view().to_string(),
                };
                json!(manipulator.create_zone_auth(&fqdn, &view).await?)
            }
            ZoneCommand::Delete { fqdn } => json!(manipulator.delete_zone_auth(&fqdn).await?),
        },

        Command::Schema(SchemaCommand::Port { name, required }) => {
            serde_json::to_value(port_schema(&name, required))?
        }
    };

    Ok(value)
}
