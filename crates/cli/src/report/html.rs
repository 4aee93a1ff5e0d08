// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML rendering of the accessibility report.
//!
//! The document is self-contained: styles and scripts are inlined and no
//! external assets are referenced. Every value that originates from scan data
//! or the environment goes through [`escape_html`]; template markup does not.

use std::borrow::Cow;
use std::fmt::{self, Write};

use chrono::{DateTime, Utc};

use crate::scan::{AccessibilityScanResult, AffectedNode, Impact, SeverityBreakdown, Violation};

/// Placeholder for missing scan fields.
const NOT_AVAILABLE: &str = "N/A";

/// Run-level values shown in the metadata block.
#[derive(Debug, Clone)]
pub struct ReportMeta<'a> {
    pub title: &'a str,
    pub test_run_type: &'a str,
    pub triggered_by: &'a str,
    pub env_url: &'a str,
    pub run_time: DateTime<Utc>,
}

/// Replace `& < > ' "` with their entities.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escaped value, or `N/A` when missing or blank.
fn field(value: Option<&str>) -> Cow<'_, str> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => escape_html(v),
        None => Cow::Borrowed(NOT_AVAILABLE),
    }
}

fn css() -> &'static str {
    r#"* { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      margin: 20px;
      background: #f9f9f9;
      color: #333;
    }
    .banner {
      background: linear-gradient(135deg, #a45db3, #f0d4e2);
      padding: 30px 20px;
      text-align: center;
      color: #fff;
      border-radius: 10px;
      box-shadow: 0 4px 10px rgba(0, 0, 0, 0.2);
      margin-bottom: 30px;
    }
    .banner h1 { font-size: 2.5em; margin: 0; }
    .banner p { font-size: 0.85em; line-height: 1.5; }
    .banner a { color: #fff; }
    .metadata-container {
      background: linear-gradient(135deg, #e6f2ff, #cce0ff);
      padding: 20px;
      border-radius: 10px;
      box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
      margin-bottom: 30px;
      font-size: 1.1em;
    }
    .metadata-container p { margin: 0; padding: 5px 0; }
    .metadata-container span { display: inline-block; width: 160px; font-weight: bold; color: #003366; }
    .filters { text-align: center; margin-bottom: 20px; }
    .filters button {
      padding: 10px 20px;
      margin: 5px;
      border: none;
      background: #003366;
      color: #fff;
      border-radius: 5px;
      cursor: pointer;
      font-size: 1em;
    }
    .filters button:hover { background: #00509e; }
    .filters button.active { outline: 2px solid #ffcc00; }
    .section-header {
      background: #f0f0f0;
      padding: 15px;
      border-radius: 8px;
      margin-bottom: 20px;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.05);
    }
    .section-header h2 { margin: 0; color: #006699; font-size: 1.2em; }
    .section-header p { margin: 5px 0; }
    .violation-section {
      background: #f0f0f0;
      padding: 20px;
      border-radius: 10px;
      box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
      margin-bottom: 30px;
    }
    table { width: 100%; border-collapse: collapse; background: #fff; border: 1px solid #ddd; }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #eee; vertical-align: top; font-size: 0.9em; }
    th { background: #003366; color: #fff; }
    tr:nth-child(even) { background: #f2f2f2; }
    .severity-column { font-weight: bold; text-align: center; border-radius: 4px; }
    .severity-critical { color: #c00; background: #ffe6e6; }
    .severity-serious { color: #d46b00; background: #fff2e6; }
    .severity-moderate { color: #b39b00; background: #fffbe6; }
    .severity-minor { color: #2e7d32; background: #e6ffe6; }
    .severity-unknown { color: #555; background: #eee; }
    .collapsible {
      cursor: pointer;
      background: #f1f1f1;
      padding: 10px;
      border: none;
      text-align: left;
      font-size: 14px;
      color: #006699;
    }
    .collapsible.active, .collapsible:hover { background: #ddd; }
    .collapsible::after { content: ' \25BC'; font-size: 0.8em; }
    .collapsible.active::after { content: ' \25B2'; }
    .content { display: none; padding: 0 12px; background: #f9f9f9; }
    td.fixed-column { max-width: 500px; word-break: break-all; }
    td.centered { text-align: center; vertical-align: middle; }
    pre, code { white-space: pre-wrap; word-break: break-all; }
    pre { margin: 2px 0; }"#
}

fn js() -> &'static str {
    r#"document.addEventListener('DOMContentLoaded', function () {
      document.querySelectorAll('.collapsible').forEach(function (button) {
        button.addEventListener('click', function () {
          this.classList.toggle('active');
          var panel = this.nextElementSibling;
          panel.style.display = panel.style.display === 'block' ? 'none' : 'block';
        });
      });

      function filterBySeverity(severity) {
        document.querySelectorAll('.test-container').forEach(function (section) {
          var visible = 0;
          section.querySelectorAll('.violation-row').forEach(function (row) {
            var show = !severity || row.getAttribute('data-severity') === severity;
            row.style.display = show ? '' : 'none';
            if (show) visible += 1;
          });
          section.style.display = !severity || visible > 0 ? '' : 'none';
        });
      }

      document.querySelectorAll('.filter-button').forEach(function (button) {
        button.addEventListener('click', function () {
          document.querySelectorAll('.filter-button').forEach(function (b) {
            b.classList.remove('active');
          });
          button.classList.add('active');
          filterBySeverity(button.getAttribute('data-severity'));
        });
      });
    });"#
}

/// Pre-allocation estimates.
const DOCUMENT_BASE_SIZE: usize = 8 * 1024;
const ROW_SIZE: usize = 900;

/// Render the complete document.
pub fn render(results: &[AccessibilityScanResult], meta: &ReportMeta<'_>) -> String {
    let rows: usize = results.iter().map(|r| r.violations.len()).sum();
    let mut out = String::with_capacity(DOCUMENT_BASE_SIZE + rows * ROW_SIZE);
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, results, meta);
    out
}

fn write_document(
    out: &mut String,
    results: &[AccessibilityScanResult],
    meta: &ReportMeta<'_>,
) -> fmt::Result {
    let breakdown = SeverityBreakdown::from_results(results);
    let title = escape_html(meta.title);
    let css = css();

    write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    {css}
  </style>
</head>
<body>
  <div class="banner">
    <h1>{title}</h1>
    <p>
      Violations reported by an automated accessibility scanning engine, checked against
      <a href="https://www.w3.org/WAI/WCAG21/quickref/" target="_blank">WCAG 2.0, 2.1 and 2.2</a>
      success criteria at levels A, AA and AAA.
    </p>
  </div>
"#
    )?;

    write_metadata(out, meta, &breakdown)?;
    write_filters(out, &breakdown)?;
    for (index, result) in results.iter().enumerate() {
        write_section(out, index + 1, result)?;
    }

    write!(
        out,
        r#"  <script>
    {js}
  </script>
</body>
</html>
"#,
        js = js(),
    )
}

fn write_metadata(out: &mut String, meta: &ReportMeta<'_>, breakdown: &SeverityBreakdown) -> fmt::Result {
    write!(
        out,
        r#"  <div class="metadata-container">
    <p><span>Test Run:</span> {run_type}</p>
    <p><span>Triggered By:</span> {triggered_by}</p>
    <p><span>Test Env (URL):</span> {env_url}</p>
    <p><span>Run Time:</span> {run_time}</p>
    <p><span>Total Violations:</span> {total} ("#,
        run_type = escape_html(meta.test_run_type),
        triggered_by = escape_html(meta.triggered_by),
        env_url = escape_html(meta.env_url),
        run_time = meta.run_time.format("%Y-%m-%d %H:%M:%S UTC"),
        total = breakdown.total(),
    )?;
    for (index, impact) in Impact::RANKED.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write!(out, "{}: {}", impact.label(), breakdown.count(*impact))?;
    }
    if breakdown.unknown > 0 {
        write!(out, ", {}: {}", Impact::Unknown.label(), breakdown.unknown)?;
    }
    writeln!(out, ")</p>\n  </div>")
}

fn write_filters(out: &mut String, breakdown: &SeverityBreakdown) -> fmt::Result {
    writeln!(out, r#"  <div class="filters">"#)?;
    writeln!(
        out,
        r#"    <button class="filter-button active" type="button" data-severity="">All</button>"#
    )?;
    for impact in Impact::RANKED {
        writeln!(
            out,
            r#"    <button class="filter-button" type="button" data-severity="{}">{} ({})</button>"#,
            impact.as_str(),
            impact.label(),
            breakdown.count(impact),
        )?;
    }
    writeln!(out, "  </div>")
}

fn write_section(out: &mut String, number: usize, result: &AccessibilityScanResult) -> fmt::Result {
    write!(
        out,
        r#"  <section class="test-container">
    <div class="section-header">
      <h2>#{number} Test Name: {name}</h2>
      <p><strong>Test Page:</strong> "#,
        name = field(result.test_name.as_deref()),
    )?;
    match result.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let url = escape_html(url);
            write!(out, r#"<a href="{url}" target="_blank">{url}</a>"#)?;
        }
        None => out.push_str(NOT_AVAILABLE),
    }
    write!(
        out,
        r#"</p>
      <p><strong>Test Scope:</strong> <code>{scope}</code></p>
    </div>
    <div class="violation-section">
      <table>
        <thead>
          <tr>
            <th>#</th>
            <th>Violation</th>
            <th>Rule ID</th>
            <th>Severity</th>
            <th>WCAG Tags</th>
            <th>Nodes Affected</th>
            <th>Possible Fix</th>
          </tr>
        </thead>
        <tbody>
"#,
        scope = field(result.test_scope.as_deref()),
    )?;

    for (index, violation) in result.violations.iter().enumerate() {
        write_row(out, index + 1, violation)?;
    }

    writeln!(
        out,
        r#"        </tbody>
      </table>
    </div>
  </section>"#
    )
}

fn write_row(out: &mut String, number: usize, violation: &Violation) -> fmt::Result {
    let severity = violation.impact.as_str();
    let joined = violation.tags.join(", ");
    let tags = if joined.is_empty() {
        Cow::Borrowed(NOT_AVAILABLE)
    } else {
        escape_html(&joined)
    };

    write!(
        out,
        r#"          <tr class="violation-row" data-severity="{severity}">
            <td>{number}</td>
            <td>{description}</td>
            <td>{rule}</td>
            <td class="severity-column severity-{severity}">{severity}</td>
            <td>{tags}</td>
            <td class="fixed-column">
              <button class="collapsible" type="button">Show Nodes</button>
              <div class="content">
"#,
        description = field(violation.description.as_deref()),
        rule = field(violation.id.as_deref()),
    )?;

    write_nodes(out, &violation.nodes)?;

    write!(
        out,
        r#"              </div>
            </td>
            <td class="centered">"#
    )?;
    match violation.help_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => write!(out, r#"<a href="{}" target="_blank">Fix</a>"#, escape_html(url))?,
        None => out.push_str(NOT_AVAILABLE),
    }
    writeln!(out, "</td>\n          </tr>")
}

fn write_nodes(out: &mut String, nodes: &[AffectedNode]) -> fmt::Result {
    if nodes.is_empty() {
        return writeln!(out, "                <p>No nodes affected</p>");
    }
    for (index, node) in nodes.iter().enumerate() {
        writeln!(
            out,
            "                <p class=\"node-summary\">{}. Affected Node:</p>\n                <pre><code>{}</code></pre>",
            index + 1,
            field(node.html.as_deref()),
        )?;
        if let Some(summary) = node.failure_summary.as_deref().filter(|s| !s.is_empty()) {
            writeln!(
                out,
                "                <pre class=\"failure-summary\">{}</pre>",
                escape_html(summary)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
