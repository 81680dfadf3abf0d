use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyFrozenSet, PyList};

use crate::{mine, report::Report, Corpus, MiningConfig};

/// Apriori algorithm for association rules.
///
/// Returns a dict with the frequent itemsets as `{frozenset: count}`, the
/// rules as `(antecedent, consequent, support, confidence)` tuples, and the
/// per-level counts with `last_level` and `truncated`.
#[pyfunction(name = "apriori")]
#[pyo3(signature = (transactions, support, confidence))]
fn py_apriori(
    py: Python<'_>,
    transactions: Vec<Vec<String>>,
    support: u32,
    confidence: f64,
) -> PyResult<Py<PyDict>> {
    let corpus = Corpus::from_baskets(transactions);
    let config = MiningConfig::new(support, confidence);
    let report = py
        .allow_threads(|| {
            mine(&corpus, &config).map(|(mining, rules)| Report::new(&corpus, &mining, &rules))
        })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let itemsets = PyDict::new_bound(py);
    for entry in &report.itemsets {
        itemsets.set_item(PyFrozenSet::new_bound(py, &entry.items)?, entry.support)?;
    }

    let rules = PyList::empty_bound(py);
    for rule in &report.rules {
        rules.append((
            PyFrozenSet::new_bound(py, &rule.antecedent)?,
            PyFrozenSet::new_bound(py, &rule.consequent)?,
            rule.support,
            rule.confidence,
        ))?;
    }

    let level_counts: Vec<usize> = report.levels.iter().map(|level| level.frequent).collect();

    let result = PyDict::new_bound(py);
    result.set_item("itemsets", itemsets)?;
    result.set_item("rules", rules)?;
    result.set_item("level_counts", level_counts)?;
    result.set_item("last_level", report.last_level)?;
    result.set_item("truncated", report.truncated)?;
    Ok(result.unbind())
}

#[pymodule]
#[pyo3(name = "apriori")]
fn apriori_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_apriori, m)?)?;
    Ok(())
}
