//! Per-usage update decision
//!
//! Decides whether one usage site is stale against the authoritative
//! registry and, if so, advances it: a new Pattern revision is created and
//! the usage's configuration is re-pinned to it. All recoverable failures
//! (missing entities, registry misses, materialization failures) are logged
//! and collapse to "no update" so one bad usage never blocks a batch; only
//! store unavailability escapes as an error.

use patternkit_core::errors::{PatternkitError, Result};
use patternkit_core::model::{ComponentPlugin, Pattern, PatternAsset, UsageBlock, UsageConfiguration};
use patternkit_core::registry::LibraryRegistry;
use patternkit_core::store::RevisionStore;
use tracing::{debug, error, info};

/// Attempt to update one usage site's configuration
///
/// Returns `Ok(Some(configuration))` with the rewritten configuration when
/// the usage was stale and has been advanced, `Ok(None)` when no update is
/// needed or the usage must be skipped. The staleness test is a
/// byte-for-byte comparison of content hashes, which makes the whole pass
/// idempotent: once hashes match, re-running is a no-op.
///
/// When `library_filter` is set, usages whose resolved pattern belongs to a
/// different library are left alone even if stale.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the pattern or block store is down; every
/// other failure is swallowed as `Ok(None)`.
pub fn update_usage_configuration(
    registry: &dyn LibraryRegistry,
    patterns: &mut RevisionStore<Pattern>,
    blocks: &mut RevisionStore<UsageBlock>,
    plugin: &ComponentPlugin,
    configuration: &UsageConfiguration,
    library_filter: Option<&str>,
) -> Result<Option<UsageConfiguration>> {
    // Non-pattern plugins are never inspected further.
    let Some(asset_id) = plugin.asset_id() else {
        return Ok(None);
    };
    if !configuration.has_block_id() {
        return Ok(None);
    }
    let Some(block_id) = configuration.patternkit_block_id else {
        return Ok(None);
    };

    let mut configuration = configuration.clone();

    if let Err(err) = resolve_usage_block(blocks, &mut configuration, block_id) {
        if !err.is_recoverable() {
            return Err(err);
        }
        debug!(block_id, %err, "skipping usage with unresolvable block");
        return Ok(None);
    }

    debug!(asset_id, block_id, "inspecting pattern usage");

    // The "current" comparison baseline: the pinned Pattern revision if the
    // usage carries one, otherwise the live registry asset.
    let current = match resolve_current_pattern(registry, patterns, asset_id, &configuration) {
        Ok(pattern) => pattern,
        Err(err) if err.is_recoverable() => {
            error!(asset_id, %err, "unable to load the pattern");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if let Some(library) = library_filter {
        if current.library != library {
            return Ok(None);
        }
    }

    // Re-resolve the authoritative asset and materialize it for comparison.
    let (asset, base) = match authoritative_pattern(registry, asset_id) {
        Ok(resolved) => resolved,
        Err(err) if err.is_recoverable() => {
            error!(asset_id, %err, "failed to get library asset");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    // The content hash is the single source of truth for staleness.
    if base.hash == current.hash {
        return Ok(None);
    }

    info!(
        asset_id,
        old = %current.version,
        new = %base.version,
        "updating pattern"
    );

    // Advance the stored copy: new default revision with the authoritative
    // schema, template, and version.
    let mut updated = current;
    if let Err(err) = updated.apply_asset(&asset) {
        error!(asset_id, %err, "failed to apply library asset");
        return Ok(None);
    }
    let pattern_rid = patterns.save(updated, true)?;
    configuration.pattern = Some(pattern_rid);

    // Advance the backing usage block to the new Pattern revision so a load
    // of the pinned block revision sees the same pattern this usage renders.
    if let Some(mut block) = blocks.load(&block_id)? {
        block.configuration.pattern = Some(pattern_rid);
        blocks.save(block, true)?;
    }

    // Reload to pick up the block's latest revision id, which may have
    // advanced independently of this usage.
    if let Some(block) = blocks.load(&block_id)? {
        configuration.patternkit_block_rid = Some(block.revision_id);
    }

    Ok(Some(configuration))
}

/// Check the backing usage block exists, backfilling a missing rid field
fn resolve_usage_block(
    blocks: &RevisionStore<UsageBlock>,
    configuration: &mut UsageConfiguration,
    block_id: u64,
) -> Result<()> {
    if configuration.has_block_rid() {
        let rid = configuration.patternkit_block_rid.unwrap_or_default();
        blocks
            .load_revision(rid)?
            .ok_or(PatternkitError::RevisionNotFound { revision_id: rid })?;
    } else {
        let block = blocks
            .load(&block_id)?
            .ok_or(PatternkitError::BlockNotFound { block_id })?;
        configuration.patternkit_block_rid = Some(block.revision_id);
    }
    Ok(())
}

/// Resolve the Pattern this usage currently renders
fn resolve_current_pattern(
    registry: &dyn LibraryRegistry,
    patterns: &RevisionStore<Pattern>,
    asset_id: &str,
    configuration: &UsageConfiguration,
) -> Result<Pattern> {
    if let Some(rid) = configuration.pattern.filter(|rid| *rid > 0) {
        return patterns
            .load_revision(rid)?
            .ok_or(PatternkitError::RevisionNotFound { revision_id: rid });
    }
    let (_, pattern) = authoritative_pattern(registry, asset_id)?;
    Ok(pattern)
}

/// Fetch the authoritative asset and materialize it into an ephemeral Pattern
fn authoritative_pattern(
    registry: &dyn LibraryRegistry,
    asset_id: &str,
) -> Result<(PatternAsset, Pattern)> {
    let asset = registry
        .get_asset(asset_id)?
        .ok_or_else(|| PatternkitError::AssetNotFound {
            asset_id: asset_id.to_string(),
        })?;
    let pattern =
        Pattern::from_asset(&asset).map_err(|err| PatternkitError::Materialization {
            asset_id: asset_id.to_string(),
            reason: err.to_string(),
        })?;
    Ok((asset, pattern))
}
