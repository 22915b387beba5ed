use anyhow::Result;

use super::super::{args::MissingCommand, context::CommandContext, exit_status::ExitStatus, report};
use crate::core::{MappingTable, find_missing};

pub fn missing(cmd: MissingCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(cmd.common.verbose)?;
    let source_root = ctx.source_root(cmd.source_root.as_deref())?;
    let mapping = MappingTable::load(&ctx.mapping_file(cmd.map.as_deref()))?;
    let filter = ctx.filter()?;

    let extractor = ctx.extractor(source_root);
    let report = find_missing(extractor.literals(), &filter, &mapping, extractor.root());

    report::print_missing(&report);

    Ok(ExitStatus::Success)
}
