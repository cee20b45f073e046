//! Per-file cyclomatic complexity computed from the oxc AST.

use crate::{
    collector::{collect_files, relative_display},
    types::{Assessment, FileMetrics},
};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    CatchClause, ConditionalExpression, DoWhileStatement, ForInStatement, ForOfStatement,
    ForStatement, IfStatement, LogicalExpression, SwitchCase, WhileStatement,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use prompt_helper_core::{SOURCE_EXTENSIONS, source_type_for};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Counts decision points. Starts at 1 for the single straight-line path.
struct ComplexityCounter {
    cyclomatic: usize,
}

impl<'a> Visit<'a> for ComplexityCounter {
    fn visit_if_statement(&mut self, it: &IfStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_if_statement(self, it);
    }

    fn visit_for_statement(&mut self, it: &ForStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_for_statement(self, it);
    }

    fn visit_for_in_statement(&mut self, it: &ForInStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_for_in_statement(self, it);
    }

    fn visit_for_of_statement(&mut self, it: &ForOfStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_for_of_statement(self, it);
    }

    fn visit_while_statement(&mut self, it: &WhileStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_while_statement(self, it);
    }

    fn visit_do_while_statement(&mut self, it: &DoWhileStatement<'a>) {
        self.cyclomatic += 1;
        walk::walk_do_while_statement(self, it);
    }

    // `default:` is not a branch of its own
    fn visit_switch_case(&mut self, it: &SwitchCase<'a>) {
        if it.test.is_some() {
            self.cyclomatic += 1;
        }
        walk::walk_switch_case(self, it);
    }

    fn visit_catch_clause(&mut self, it: &CatchClause<'a>) {
        self.cyclomatic += 1;
        walk::walk_catch_clause(self, it);
    }

    fn visit_conditional_expression(&mut self, it: &ConditionalExpression<'a>) {
        self.cyclomatic += 1;
        walk::walk_conditional_expression(self, it);
    }

    // &&, || and ??
    fn visit_logical_expression(&mut self, it: &LogicalExpression<'a>) {
        self.cyclomatic += 1;
        walk::walk_logical_expression(self, it);
    }
}

/// Cyclomatic complexity of one source text
pub fn cyclomatic_complexity(src: &str, path: &Path) -> Result<usize> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, src, source_type_for(path)).parse();
    if panicked {
        let first = errors.first().map(|e| e.to_string()).unwrap_or_default();
        return Err(anyhow!("{} syntax error(s): {}", errors.len(), first));
    }
    for e in &errors {
        debug!("Recovered from syntax error in {}: {}", path.display(), e);
    }

    let mut counter = ComplexityCounter { cyclomatic: 1 };
    counter.visit_program(&program);
    Ok(counter.cyclomatic)
}

fn measure_file(root: &Path, file: &Path) -> Result<FileMetrics> {
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let cyclomatic = cyclomatic_complexity(&src, file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    Ok(FileMetrics {
        file_name: relative_display(root, file),
        cyclomatic,
        line_count: src.lines().count(),
        assessment: Assessment::from_cyclomatic(cyclomatic),
    })
}

/// Measure every script file under `root`, most complex first. Files that
/// fail to read or parse are logged and left out.
pub fn collect_metrics(root: &Path) -> Result<Vec<FileMetrics>> {
    let files = collect_files(root, SOURCE_EXTENSIONS)?;
    debug!("Measuring complexity of {} files", files.len());

    let mut metrics: Vec<FileMetrics> = files
        .par_iter()
        .filter_map(|file| match measure_file(root, file) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        })
        .collect();
    metrics.sort_by(|a, b| b.cyclomatic.cmp(&a.cyclomatic).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(metrics)
}
