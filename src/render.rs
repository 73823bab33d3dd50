//! # HTML Report Rendering
//!
//! Renders the assembled [`BranchRecord`] list into a standalone HTML file:
//! a sortable-by-construction table (rows arrive already ordered oldest
//! first) with client-side controls to hide protected branches and to filter
//! by branch age.
//!
//! Rendering is display-only: the commit date is formatted as
//! `YYYY-MM-DD HH:MM:SS` for the table, but all ordering decisions were
//! already made on the parsed instant before the records got here. Every
//! remote-controlled string (paths, branch names, committer names) is
//! HTML-escaped before interpolation.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::report::BranchRecord;

/// Display format for commit dates and the report timestamp.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the report and write it to `output`.
pub fn write_report(records: &[BranchRecord], path_name: &str, output: &Path) -> Result<()> {
    let html = render(records, path_name);
    fs::write(output, html)?;
    Ok(())
}

/// Render the full report document.
pub fn render(records: &[BranchRecord], path_name: &str) -> String {
    let title = escape(path_name);
    let generated_at = Local::now().format(DATE_FORMAT).to_string();

    let mut rows = String::new();
    for record in records {
        push_row(&mut rows, record);
    }

    TEMPLATE
        .replace("{{path_name}}", &title)
        .replace("{{rows}}", &rows)
        .replace("{{timestamp}}", &generated_at)
}

fn push_row(out: &mut String, record: &BranchRecord) {
    let date = record.committed_at.format(DATE_FORMAT).to_string();
    let date_only = record.committed_at.format("%Y-%m-%d").to_string();
    let row_class = if record.protected {
        " class=\"protected-branch\" style=\"display: none;\""
    } else {
        ""
    };

    let project_label = if record.archived {
        format!("{} (archived)", escape(&record.project_path))
    } else {
        escape(&record.project_path)
    };

    let mr_cell = match &record.merge_request {
        Some(mr) => format!(
            "<a href=\"{}\" target=\"_blank\">!{}</a>",
            escape(&mr.web_url),
            mr.iid
        ),
        None => String::new(),
    };
    let state_cell = match record.mr_state {
        Some(state) => format!(
            "<span class=\"mr-state mr-state-{state}\">{state}</span>",
            state = state.as_str()
        ),
        None => String::new(),
    };

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        concat!(
            "                <tr{row_class} data-commit-date=\"{date}\">\n",
            "                    <td class=\"project-cell\">",
            "<a href=\"{project_url}\" target=\"_blank\">{project}</a></td>\n",
            "                    <td class=\"branch-cell\">",
            "<a href=\"{branch_url}\" target=\"_blank\">{branch}</a></td>\n",
            "                    <td>{committer}</td>\n",
            "                    <td class=\"date-cell\">",
            "<span class=\"date-only\">{date_only}</span>",
            "<span class=\"full-datetime\">{date}</span></td>\n",
            "                    <td>{protected}</td>\n",
            "                    <td>{merged_into}</td>\n",
            "                    <td>{mr}</td>\n",
            "                    <td>{state}</td>\n",
            "                </tr>\n",
        ),
        row_class = row_class,
        date = date,
        date_only = date_only,
        project_url = escape(&record.project_url),
        project = project_label,
        branch_url = escape(&record.branch_url),
        branch = escape(&record.branch),
        committer = escape(&record.committer),
        protected = if record.protected { "Yes" } else { "No" },
        merged_into = escape(record.merged_into.as_deref().unwrap_or("")),
        mr = mr_cell,
        state = state_cell,
    );
}

/// Minimal HTML escaping for text and attribute values.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>GitLab Branch Report - {{path_name}}</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            background-color: #f5f5f5;
        }
        .container {
            width: 100%;
            margin: 0;
            background-color: white;
            padding: 20px;
            box-sizing: border-box;
        }
        h1 {
            color: #2f2f2f;
            margin-bottom: 20px;
        }
        .controls {
            margin: 20px 0;
        }
        .checkbox-label {
            display: inline-flex;
            align-items: center;
            cursor: pointer;
            margin-right: 20px;
        }
        .checkbox-label input[type="checkbox"] {
            margin-right: 8px;
        }
        .age-filter {
            display: inline-flex;
            align-items: center;
            margin-right: 20px;
        }
        .age-filter input[type="number"] {
            width: 70px;
            margin: 0 8px;
            padding: 4px;
            border: 1px solid #ccc;
            border-radius: 4px;
        }
        .age-filter input[type="number"]:disabled {
            background-color: #f5f5f5;
            cursor: not-allowed;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
            table-layout: fixed;
        }
        th, td {
            padding: 12px;
            border-bottom: 1px solid #ddd;
            overflow: hidden;
            text-overflow: ellipsis;
            white-space: nowrap;
        }
        th:nth-child(1), td:nth-child(1) {
            width: 30%;
            direction: rtl;
            text-align: left;
        }
        th:nth-child(2), td:nth-child(2) {
            width: 25%;
            direction: ltr;
            text-align: left;
        }
        .project-cell {
            direction: rtl;
            text-align: left;
            overflow: hidden;
            text-overflow: ellipsis;
            white-space: nowrap;
        }
        .branch-cell {
            direction: ltr;
            text-align: left;
            overflow: hidden;
            text-overflow: ellipsis;
            white-space: nowrap;
        }
        th {
            background-color: #4a4a4a;
            color: white;
            position: sticky;
            top: 0;
            z-index: 1;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        tr:hover {
            background-color: #f5f5f5;
        }
        td:hover {
            white-space: normal;
            word-wrap: break-word;
        }
        .timestamp {
            text-align: right;
            color: #666;
            font-size: 0.9em;
            margin-top: 20px;
        }
        a {
            color: #1a73e8;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        .mr-state {
            text-transform: capitalize;
            padding: 4px 8px;
            border-radius: 4px;
            font-size: 0.9em;
            font-weight: 500;
        }
        .mr-state-opened {
            background-color: #2da44e;
            color: white;
        }
        .mr-state-closed {
            background-color: #cf222e;
            color: white;
        }
        .mr-state-merged {
            background-color: #8250df;
            color: white;
        }
        .mr-state-locked {
            background-color: #6e7781;
            color: white;
        }
        .date-cell {
            position: relative;
        }
        .date-cell .date-only {
            display: inline-block;
        }
        .date-cell .full-datetime {
            display: none;
            position: absolute;
            background-color: #333;
            color: white;
            padding: 2px 2px;
            font-size: smaller;
            transform: translateY(-80%);
        }
        .date-cell:hover .full-datetime {
            display: block;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>GitLab Branch Report - {{path_name}}</h1>
        <div class="controls">
            <label class="checkbox-label">
                <input type="checkbox" id="hideProtectedBranches" checked>
                Hide protected branches
            </label>
            <label class="checkbox-label">
                <input type="checkbox" id="hideYoungBranches" checked>
                Only show branches older than
            </label>
            <span class="age-filter">
                <input type="number" id="minAge" value="90" min="1">
                days
            </span>
        </div>
        <table>
            <thead>
                <tr>
                    <th>Project</th>
                    <th>Branch</th>
                    <th>Last Committer</th>
                    <th>Last Commit Date</th>
                    <th>Protected</th>
                    <th>Merged Into</th>
                    <th>MR</th>
                    <th>MR State</th>
                </tr>
            </thead>
            <tbody>
{{rows}}            </tbody>
        </table>
        <div class="timestamp">
            Report generated on: {{timestamp}}
        </div>
    </div>
    <script>
        function toggleProtectedBranches(hide) {
            const protectedBranches = document.querySelectorAll('.protected-branch');
            protectedBranches.forEach(row => {
                row.style.display = hide ? 'none' : '';
                if (!hide && document.getElementById('hideYoungBranches').checked) {
                    applyAgeFilter(row);
                }
            });
        }

        function isWithinDays(dateStr, days) {
            const commitDate = new Date(dateStr);
            const now = new Date();
            const diffTime = Math.abs(now - commitDate);
            const diffDays = Math.ceil(diffTime / (1000 * 60 * 60 * 24));
            return diffDays >= days;
        }

        function applyAgeFilter(row) {
            if (!document.getElementById('hideYoungBranches').checked) {
                row.style.display = row.classList.contains('protected-branch') &&
                                  document.getElementById('hideProtectedBranches').checked ?
                                  'none' : '';
                return;
            }

            const minAge = parseInt(document.getElementById('minAge').value, 10);
            const commitDate = row.getAttribute('data-commit-date');
            const isProtected = row.classList.contains('protected-branch');
            const hideProtected = document.getElementById('hideProtectedBranches').checked;

            if ((isProtected && hideProtected) || !isWithinDays(commitDate, minAge)) {
                row.style.display = 'none';
            } else {
                row.style.display = '';
            }
        }

        function applyAgeFilterToAll() {
            document.querySelectorAll('tbody tr').forEach(applyAgeFilter);
        }

        document.getElementById('hideProtectedBranches').addEventListener('change', function(e) {
            toggleProtectedBranches(e.target.checked);
        });

        document.getElementById('hideYoungBranches').addEventListener('change', function(e) {
            document.getElementById('minAge').disabled = !e.target.checked;
            applyAgeFilterToAll();
        });

        document.getElementById('minAge').addEventListener('input', applyAgeFilterToAll);

        toggleProtectedBranches(true);
        applyAgeFilterToAll();
    </script>
</body>
</html>
"#;
