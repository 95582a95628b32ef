//! Headerless numeric CSV ⇄ dense matrices (one point / element per row).

use anyhow::{bail, Context, Result};
use meshweld::{Elements, Points};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn read_frame(path: &Path) -> Result<Option<DataFrame>> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(None);
    }
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening csv {}", path.display()))?
        .collect()
        .with_context(|| format!("parsing csv {}", path.display()))?;
    Ok(Some(df))
}

/// Columns of `df` cast to `dtype`, each as a vector of optional values.
fn columns_as<T, F>(df: &DataFrame, dtype: DataType, extract: F) -> Result<Vec<Vec<T>>>
where
    F: Fn(&Series) -> PolarsResult<Vec<Option<T>>>,
{
    let mut out = Vec::with_capacity(df.width());
    for (k, s) in df.get_columns().iter().enumerate() {
        let cast = s.cast(&dtype)?;
        let values = extract(&cast)?
            .into_iter()
            .enumerate()
            .map(|(r, v)| v.with_context(|| format!("missing value at row {r}, column {k}")))
            .collect::<Result<Vec<T>>>()?;
        out.push(values);
    }
    Ok(out)
}

pub fn read_points_csv(path: &Path) -> Result<Points> {
    let Some(df) = read_frame(path)? else {
        return Ok(Points::zeros(0, 0));
    };
    let cols = columns_as(&df, DataType::Float64, |s| Ok(s.f64()?.into_iter().collect()))?;
    Ok(Points::from_fn(df.height(), cols.len(), |r, c| cols[c][r]))
}

pub fn read_elements_csv(path: &Path) -> Result<Elements> {
    let Some(df) = read_frame(path)? else {
        return Ok(Elements::zeros(0, 0));
    };
    let cols = columns_as(&df, DataType::Int64, |s| Ok(s.i64()?.into_iter().collect()))?;
    let mut out = Elements::zeros(df.height(), cols.len());
    for (c, col) in cols.iter().enumerate() {
        for (r, &v) in col.iter().enumerate() {
            if v < 0 {
                bail!("{}: negative index {v} at row {r}", path.display());
            }
            out[(r, c)] = v as usize;
        }
    }
    Ok(out)
}

/// Single-column integer file (one importance level per point).
pub fn read_importance_csv(path: &Path) -> Result<Vec<i64>> {
    let Some(df) = read_frame(path)? else {
        return Ok(Vec::new());
    };
    if df.width() != 1 {
        bail!("{}: expected one column, found {}", path.display(), df.width());
    }
    let mut cols = columns_as(&df, DataType::Int64, |s| Ok(s.i64()?.into_iter().collect()))?;
    Ok(cols.remove(0))
}

fn write_frame(path: &Path, columns: Vec<Series>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn write_points_csv(path: &Path, points: &Points) -> Result<()> {
    let columns = (0..points.ncols())
        .map(|c| {
            let values: Vec<f64> = points.column(c).iter().copied().collect();
            Series::new(format!("x{c}").into(), values)
        })
        .collect();
    write_frame(path, columns)
}

pub fn write_elements_csv(path: &Path, elements: &Elements) -> Result<()> {
    let columns = (0..elements.ncols())
        .map(|c| {
            let values: Vec<u64> = elements.column(c).iter().map(|&i| i as u64).collect();
            Series::new(format!("v{c}").into(), values)
        })
        .collect();
    write_frame(path, columns)
}

pub fn write_index_map_csv(path: &Path, map: &[usize]) -> Result<()> {
    let values: Vec<u64> = map.iter().map(|&i| i as u64).collect();
    write_frame(path, vec![Series::new("new_index".into(), values)])
}
