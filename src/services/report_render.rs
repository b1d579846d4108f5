//! Markdown rendering for due-diligence reports.
//!
//! Pure functions over the stored report document. Section order is fixed:
//! header, executive summary, company information, legal information,
//! registrations, intellectual property, risk assessment, branches,
//! disclaimer. Sections absent from the document are skipped entirely.

use chrono::NaiveDate;

use crate::models::report::{DueDiligenceReport, ReportCompany, ReportData};

/// Render the full Markdown document for a stored report.
pub fn render_markdown(report: &DueDiligenceReport, data: &ReportData) -> String {
    let mut out = String::with_capacity(4096);

    render_header(&mut out, report, data);
    render_executive_summary(&mut out, data);
    render_company_info(&mut out, &data.company);
    render_legal_info(&mut out, &data.company);
    render_registrations(&mut out, data);
    render_intellectual_property(&mut out, data);
    render_risk_assessment(&mut out, data);
    render_branches(&mut out, data);
    render_disclaimer(&mut out);

    out
}

/// Attachment filename: `due-diligence-report-{slug}-{date}.md`.
///
/// The slug must survive a `Content-Disposition` header, so it is reduced
/// to ASCII. The English name is preferred; a company with only a Chinese
/// name that slugs to nothing falls back to a generic stem.
pub fn suggested_filename(company: &ReportCompany, date: NaiveDate) -> String {
    let slug = company
        .name_en
        .as_deref()
        .map(filename_slug)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(filename_slug(&company.name)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "company".to_string());

    format!("due-diligence-report-{}-{}.md", slug, date.format("%Y-%m-%d"))
}

/// Lowercase ASCII alphanumerics with single dashes between runs.
pub fn filename_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Table cells must not break the row structure.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn opt_cell(value: Option<&str>) -> String {
    value.map(cell).unwrap_or_else(|| "-".to_string())
}

fn opt_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render_header(out: &mut String, report: &DueDiligenceReport, data: &ReportData) {
    out.push_str(&format!("# Due Diligence Report: {}\n\n", data.company.name));
    if let Some(name_en) = &data.company.name_en {
        out.push_str(&format!("*{}*\n\n", name_en));
    }
    out.push_str(&format!("- Report type: {}\n", report.report_type));
    out.push_str(&format!(
        "- Generated: {}\n",
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "- Valid until: {}\n\n",
        report.expires_at.format("%Y-%m-%d")
    ));
}

fn render_executive_summary(out: &mut String, data: &ReportData) {
    out.push_str("## Executive Summary\n\n");

    let company = &data.company;
    let mut sentence = company.name.clone();
    if let Some(business_type) = &company.business_type {
        sentence.push_str(&format!(" is a {} company", business_type.to_lowercase()));
    } else {
        sentence.push_str(" is a company");
    }
    match (&company.city, &company.country) {
        (Some(city), Some(country)) => {
            sentence.push_str(&format!(" based in {}, {}", city, country))
        }
        (Some(city), None) => sentence.push_str(&format!(" based in {}", city)),
        (None, Some(country)) => sentence.push_str(&format!(" based in {}", country)),
        (None, None) => {}
    }
    if let Some(year) = company.founding_year {
        sentence.push_str(&format!(", founded in {}", year));
    }
    sentence.push('.');
    out.push_str(&sentence);
    out.push('\n');

    if let Some(registrations) = &data.registrations {
        out.push_str(&format!(
            "The company holds {} regulatory registration(s) across the FDA and NMPA registers.\n",
            registrations.total_count
        ));
    }
    if let Some(risk) = &data.risk_assessment {
        out.push_str(&format!(
            "Overall risk is assessed as {} ({}/100).\n",
            risk.risk_level.as_str(),
            risk.risk_score
        ));
    }
    out.push('\n');
}

fn render_company_info(out: &mut String, company: &ReportCompany) {
    out.push_str("## Company Information\n\n");
    out.push_str("| Field | Value |\n|-------|-------|\n");
    out.push_str(&format!("| Name | {} |\n", cell(&company.name)));
    out.push_str(&format!(
        "| English name | {} |\n",
        opt_cell(company.name_en.as_deref())
    ));
    out.push_str(&format!(
        "| Country | {} |\n",
        opt_cell(company.country.as_deref())
    ));
    out.push_str(&format!(
        "| Province | {} |\n",
        opt_cell(company.province.as_deref())
    ));
    out.push_str(&format!("| City | {} |\n", opt_cell(company.city.as_deref())));
    out.push_str(&format!(
        "| Address | {} |\n",
        opt_cell(company.address.as_deref())
    ));
    out.push_str(&format!(
        "| Website | {} |\n",
        opt_cell(company.website.as_deref())
    ));
    out.push_str(&format!(
        "| Business type | {} |\n",
        opt_cell(company.business_type.as_deref())
    ));
    out.push_str(&format!(
        "| Founded | {} |\n",
        company
            .founding_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    out.push_str(&format!(
        "| Employees | {} |\n",
        company
            .employee_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    out.push('\n');
    if let Some(description) = &company.description {
        out.push_str(description);
        out.push_str("\n\n");
    }
}

/// Present only when the tier included legal-standing fields.
fn render_legal_info(out: &mut String, company: &ReportCompany) {
    let has_legal = company.legal_representative.is_some()
        || company.registered_capital.is_some()
        || company.registration_number.is_some()
        || company.business_status.is_some();
    if !has_legal {
        return;
    }

    out.push_str("## Legal Information\n\n");
    out.push_str("| Field | Value |\n|-------|-------|\n");
    out.push_str(&format!(
        "| Legal representative | {} |\n",
        opt_cell(company.legal_representative.as_deref())
    ));
    out.push_str(&format!(
        "| Registered capital | {} |\n",
        opt_cell(company.registered_capital.as_deref())
    ));
    out.push_str(&format!(
        "| Registration number | {} |\n",
        opt_cell(company.registration_number.as_deref())
    ));
    out.push_str(&format!(
        "| Business status | {} |\n",
        opt_cell(company.business_status.as_deref())
    ));
    out.push('\n');
}

fn render_registrations(out: &mut String, data: &ReportData) {
    let Some(registrations) = &data.registrations else {
        return;
    };

    out.push_str("## Regulatory Registrations\n\n");
    out.push_str(&format!(
        "{} registration(s) on file across both registers.\n\n",
        registrations.total_count
    ));

    out.push_str("### FDA\n\n");
    if registrations.fda.is_empty() {
        out.push_str("No FDA registrations on file.\n\n");
    } else {
        out.push_str("| Registration | Device | Class | Status | Cleared |\n");
        out.push_str("|--------------|--------|-------|--------|--------|\n");
        for reg in &registrations.fda {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&reg.registration_number),
                cell(&reg.device_name),
                opt_cell(reg.device_class.as_deref()),
                opt_cell(reg.status.as_deref()),
                opt_date(reg.cleared_at),
            ));
        }
        out.push('\n');
    }

    out.push_str("### NMPA\n\n");
    if registrations.nmpa.is_empty() {
        out.push_str("No NMPA registrations on file.\n\n");
    } else {
        out.push_str("| Registration | Product | Class | Status | Approved |\n");
        out.push_str("|--------------|---------|-------|--------|---------|\n");
        for reg in &registrations.nmpa {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&reg.registration_number),
                cell(&reg.product_name),
                opt_cell(reg.management_class.as_deref()),
                opt_cell(reg.status.as_deref()),
                opt_date(reg.approved_at),
            ));
        }
        out.push('\n');
    }
}

fn render_intellectual_property(out: &mut String, data: &ReportData) {
    let Some(ip) = &data.intellectual_property else {
        return;
    };

    out.push_str("## Intellectual Property\n\n");

    out.push_str(&format!("### Patents ({} on file)\n\n", ip.patent_count));
    if ip.patents.is_empty() {
        out.push_str("No patents on file.\n\n");
    } else {
        out.push_str("| Number | Title | Type | Status | Filed |\n");
        out.push_str("|--------|-------|------|--------|-------|\n");
        for patent in &ip.patents {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&patent.patent_number),
                cell(&patent.title),
                opt_cell(patent.patent_type.as_deref()),
                opt_cell(patent.status.as_deref()),
                opt_date(patent.filed_at),
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "### Trademarks ({} on file)\n\n",
        ip.trademark_count
    ));
    if ip.trademarks.is_empty() {
        out.push_str("No trademarks on file.\n\n");
    } else {
        out.push_str("| Number | Mark | Class | Status | Registered |\n");
        out.push_str("|--------|------|-------|--------|-----------|\n");
        for trademark in &ip.trademarks {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&trademark.registration_number),
                cell(&trademark.mark_name),
                opt_cell(trademark.intl_class.as_deref()),
                opt_cell(trademark.status.as_deref()),
                opt_date(trademark.registered_at),
            ));
        }
        out.push('\n');
    }
}

fn render_risk_assessment(out: &mut String, data: &ReportData) {
    let Some(risk) = &data.risk_assessment else {
        return;
    };

    out.push_str("## Risk Assessment\n\n");
    out.push_str(&format!("Risk Score: {}/100\n\n", risk.risk_score));
    out.push_str(&format!("Risk Level: {}\n\n", risk.risk_level.as_str()));

    if !risk.risk_factors.is_empty() {
        out.push_str("### Risk Factors\n\n");
        for factor in &risk.risk_factors {
            out.push_str(&format!("- {}\n", factor));
        }
        out.push('\n');
    }

    if !risk.litigations.is_empty() {
        out.push_str("### Litigation Records\n\n");
        out.push_str("| Case | Type | Court | Status | Filed |\n");
        out.push_str("|------|------|-------|--------|-------|\n");
        for case in &risk.litigations {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&case.case_number),
                opt_cell(case.case_type.as_deref()),
                opt_cell(case.court.as_deref()),
                opt_cell(case.status.as_deref()),
                opt_date(case.filed_at),
            ));
        }
        out.push('\n');
    }

    if !risk.abnormal_operations.is_empty() {
        out.push_str("### Abnormal Operations\n\n");
        out.push_str("| Reason | Authority | Listed | Removed |\n");
        out.push_str("|--------|-----------|--------|--------|\n");
        for op in &risk.abnormal_operations {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                cell(&op.reason),
                opt_cell(op.authority.as_deref()),
                opt_date(op.listed_at),
                opt_date(op.removed_at),
            ));
        }
        out.push('\n');
    }
}

fn render_branches(out: &mut String, data: &ReportData) {
    let Some(branches) = &data.branches else {
        return;
    };

    out.push_str("## Branch Network\n\n");
    if branches.is_empty() {
        out.push_str("No branches on file.\n\n");
        return;
    }
    out.push_str("| Name | Address | Status |\n");
    out.push_str("|------|---------|--------|\n");
    for branch in branches {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            cell(&branch.name),
            opt_cell(branch.address.as_deref()),
            opt_cell(branch.status.as_deref()),
        ));
    }
    out.push('\n');
}

fn render_disclaimer(out: &mut String) {
    out.push_str("---\n\n");
    out.push_str(
        "This report is compiled from public regulatory registers and corporate \
         filings at generation time. It is provided for informational purposes \
         only and does not constitute legal, financial or investment advice.\n",
    );
}
