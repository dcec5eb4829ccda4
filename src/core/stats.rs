use crate::core::entry::REGISTRY_FILE;
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 50;

/// Registrar name from a registry response: the `fn` of the first entity,
/// provided that entity's first role is `registrar`.
pub fn registrar_name(response: &Value) -> Option<String> {
    let entity = response.get("entities")?.get(0)?;
    if entity.get("roles")?.get(0)?.as_str()? != "registrar" {
        return None;
    }

    let fn_property = entity.get("vcardArray")?.get(1)?.get(1)?;
    if fn_property.get(0)?.as_str()? != "fn" {
        return None;
    }
    fn_property.get(3)?.as_str().map(str::to_string)
}

/// Every `registry_response.json` below `root`, in path order. A missing
/// root yields nothing; symlinked directories are not descended into.
pub fn registry_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        tracing::debug!("Entry tree {} does not exist", root.display());
        return Ok(files);
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                pending.push(path);
            } else if path.file_name().is_some_and(|name| name == REGISTRY_FILE) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

pub fn count_registrars(root: &Path) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();

    for path in registry_files(root)? {
        let content = fs::read(&path)?;
        let name = match serde_json::from_slice::<Value>(&content) {
            Ok(value) => registrar_name(&value),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match name {
            Some(name) => *counts.entry(name).or_insert(0) += 1,
            None => tracing::warn!("No registrar entity in {}", path.display()),
        }
    }

    Ok(counts)
}

/// Highest count first, ties by name.
pub fn ranked(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut rows: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

pub fn write_table<W: Write>(out: &mut W, counts: &BTreeMap<String, usize>) -> Result<()> {
    let rows = ranked(counts);
    let max = rows.first().map(|(_, count)| *count).unwrap_or(0);
    let name_width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    for (name, count) in rows {
        let bar = (count * BAR_WIDTH).div_ceil(max.max(1));
        writeln!(
            out,
            "{:<width$}  {} {}",
            name,
            "#".repeat(bar),
            count,
            width = name_width
        )?;
    }
    Ok(())
}

pub fn write_csv<W: Write>(out: W, counts: &BTreeMap<String, usize>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["registrar", "count"])?;
    for (name, count) in ranked(counts) {
        writer.write_record([name, count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
