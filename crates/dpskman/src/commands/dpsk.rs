//! DPSK command handlers.

use tabled::Tabled;
use tracing::debug;

use dpskman_core::workflow::{self, ModifyReport, Provisioned};
use dpskman_core::{CreateRequest, DpskRecord};

use crate::cli::{DpskArgs, DpskCommand, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::{flags, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DpskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "WLAN")]
    wlansvc_id: i64,
    #[tabled(rename = "VLAN")]
    dvlan_id: i64,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Passphrase")]
    passphrase: String,
    #[tabled(rename = "Expire")]
    expire: String,
}

impl From<&DpskRecord> for DpskRow {
    fn from(r: &DpskRecord) -> Self {
        Self {
            id: r.id,
            user: r.user.clone(),
            wlansvc_id: r.wlansvc_id,
            dvlan_id: r.dvlan_id,
            mac: r.mac.clone(),
            passphrase: r.passphrase.clone(),
            expire: r.expire.clone(),
        }
    }
}

fn record_detail(p: &Provisioned) -> String {
    let r = &p.record;
    let status = if p.created { "created" } else { "existing" };
    format!(
        "ID:         {}\nUser:       {}\nWLAN:       {}\nPassphrase: {}\nStatus:     {status}",
        r.id, r.user, r.wlansvc_id, r.passphrase
    )
}

fn report_detail(report: &ModifyReport) -> String {
    if report.updated.is_empty() {
        return "No matching DPSK records; nothing changed".into();
    }
    let ids: Vec<String> = report.updated.iter().map(ToString::to_string).collect();
    format!(
        "Updated {} DPSK record(s): {}",
        report.updated.len(),
        ids.join(", ")
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: DpskArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        DpskCommand::List(raw) => {
            let Some(filters) = flags::parse_list(&raw.flags)? else {
                return Ok(());
            };
            for predicate in filters.predicates() {
                debug!(filter = %predicate, "filtering by");
            }

            let controller = util::connect(cfg, global).await?;
            let records = workflow::list_matching(&controller, &filters).await?;

            let out = output::render_list(
                &format,
                &records,
                |r| DpskRow::from(r),
                |r| r.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DpskCommand::Create(args) => {
            let request = CreateRequest::new(args.wlansvc_id, &args.user, args.length)?;

            let controller = util::connect(cfg, global).await?;
            let provisioned = workflow::ensure_record(&controller, &request).await?;

            let out = output::render_single(&format, &provisioned, record_detail, |p| {
                p.record.passphrase.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DpskCommand::Modify(raw) => {
            let Some((filters, updates)) = flags::parse_modify(&raw.flags)? else {
                return Ok(());
            };
            for predicate in filters.predicates() {
                debug!(filter = %predicate, "filtering by");
            }
            for (field, _) in updates.iter() {
                debug!(%field, "setting");
            }

            let controller = util::connect(cfg, global).await?;
            let targets = workflow::list_matching(&controller, &filters).await?;

            if !targets.is_empty() {
                let prompt = format!("Modify {} DPSK record(s)?", targets.len());
                if !util::confirm("dpsk modify", &prompt, global.yes)? {
                    if !global.quiet {
                        eprintln!("Aborted; nothing changed");
                    }
                    return Ok(());
                }
            }

            let report = workflow::apply_updates(&controller, &targets, &updates).await?;

            let out = output::render_single(&format, &report, report_detail, |r| {
                r.updated
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
