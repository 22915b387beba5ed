use anyhow::Result;

use super::super::{args::SyncCommand, context::CommandContext, exit_status::ExitStatus, report};
use crate::core::{MappingTable, sync_catalog};

/// Apply the mapping table to the catalog.
///
/// Exits with `Failure` when some catalog entries are left without a
/// translation, so the command can gate a release build.
pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(cmd.common.verbose)?;
    let mapping_path = ctx.mapping_file(cmd.map.as_deref());
    let catalog_path = ctx.catalog_file(cmd.catalog.as_deref());

    let mapping = MappingTable::load(&mapping_path)?;
    let outcome = sync_catalog(&catalog_path, &mapping, ctx.verbose)?;

    report::print_sync_outcome(&catalog_path, &outcome, mapping.len(), ctx.verbose);

    if outcome.unmapped.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
