//! Lead notification email
//!
//! Plain string interpolation into a fixed HTML layout. Every user-supplied
//! value is HTML-escaped before it is inserted.

use std::fmt::Write;

use crate::config::Brand;
use crate::records::LeadRecord;
use crate::utils::{format_currency, format_currency_opt, format_number, humanize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// `New Topleads Lead: Acme (R 24,000/mo Leak)`
pub fn lead_subject(brand: Brand, lead: &LeadRecord) -> String {
    let who = lead.lead.company.as_deref().unwrap_or(&lead.lead.name);
    match lead.lead.context_total_leak {
        Some(total) => format!("New {} Lead: {} ({}/mo Leak)", brand, who, format_currency(total)),
        None => match lead.lead.cta_type.as_deref() {
            Some(cta) => format!("New {} Lead: {} ({})", brand, who, humanize(cta)),
            None => format!("New {} Lead: {}", brand, who),
        },
    }
}

pub fn render_lead_email(brand: Brand, lead: &LeadRecord) -> RenderedEmail {
    let l = &lead.lead;
    let mut html = String::new();

    // write! into a String cannot fail
    let _ = writeln!(html, "<h1>New {} Strategy Call Request</h1>", brand);
    html.push_str("<p>A new lead just came through the funnel.</p>\n<hr>\n");

    html.push_str("<h2>Contact Details</h2>\n<ul>\n");
    item(&mut html, "Name", &l.name);
    item(&mut html, "Company", l.company.as_deref().unwrap_or("N/A"));
    item(&mut html, "Email", &l.email);
    item(&mut html, "Phone", &l.phone);
    item(&mut html, "Website", l.website_url.as_deref().unwrap_or("N/A"));
    html.push_str("</ul>\n");

    if l.context_total_leak.is_some() || l.context_data.is_some() {
        html.push_str("<hr>\n<h2>Diagnostic Report</h2>\n<ul>\n");
        let _ = writeln!(
            html,
            "  <li><strong>Total Leaked Revenue:</strong> <strong style=\"color: #f97316;\">{} / month</strong></li>",
            format_currency_opt(l.context_total_leak)
        );
        if let Some(answers) = &l.context_data {
            item(&mut html, "Trust Leak (Reviews)", &format!("{} ★", format_number(answers.review_rating, 1)));
            item(&mut html, "Traffic Leak (Rank)", answers.map_rank.display_name());
            item(&mut html, "Enquiry Leak (24/7)", answers.enquiry_method.display_name());
        }
        html.push_str("</ul>\n");
    }

    let has_project_context = l.context_industry.is_some()
        || l.context_flow_rate.is_some()
        || l.context_calc_area.is_some()
        || l.project_notes.is_some();
    if has_project_context {
        html.push_str("<hr>\n<h2>Project Context</h2>\n<ul>\n");
        if let Some(industry) = &l.context_industry {
            item(&mut html, "Industry", &humanize(industry));
        }
        if let Some(flow) = l.context_flow_rate {
            item(&mut html, "Flow Rate", &format!("{} m³/hr", format_number(flow, 0)));
        }
        if let Some(tss) = l.context_tss {
            item(&mut html, "TSS", &format!("{} mg/L", format_number(tss, 0)));
        }
        if let Some(area) = l.context_calc_area {
            item(&mut html, "Calculated Area", &format!("{} m²", format_number(area, 1)));
        }
        if let Some(capex) = l.context_calc_capex_max {
            item(&mut html, "Capex (upper)", &format_currency(capex));
        }
        if let Some(opex) = l.context_calc_opex {
            item(&mut html, "Annual Opex", &format_currency(opex));
        }
        if let Some(notes) = &l.project_notes {
            item(&mut html, "Notes", notes);
        }
        html.push_str("</ul>\n");
    }

    if l.report_id.is_some() || l.cta_type.is_some() || l.concept_focus.is_some() {
        html.push_str("<hr>\n<h2>Source</h2>\n<ul>\n");
        if let Some(report_id) = &l.report_id {
            item(&mut html, "Report", report_id);
        }
        if let Some(cta) = &l.cta_type {
            item(&mut html, "CTA", &humanize(cta));
        }
        if let Some(focus) = &l.concept_focus {
            item(&mut html, "Concept", &humanize(focus));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(html, "<p style=\"color: #6b7280;\">Lead ID: {}</p>", escape_html(&lead.id));

    RenderedEmail {
        subject: lead_subject(brand, lead),
        html,
    }
}

fn item(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "  <li><strong>{}:</strong> {}</li>", label, escape_html(value));
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::LeakInputs;
    use crate::records::{validate_lead, LeadCaptureRequest};
    use chrono::Utc;

    fn lead(request: LeadCaptureRequest) -> LeadRecord {
        LeadRecord {
            id: "lead-1".into(),
            created_at: Utc::now(),
            lead: validate_lead(&request).unwrap(),
        }
    }

    fn base() -> LeadCaptureRequest {
        LeadCaptureRequest {
            name: Some("Sipho".into()),
            email: Some("sipho@example.co.za".into()),
            phone: Some("0820000000".into()),
            company: Some("Sipho's Plumbing".into()),
            ..LeadCaptureRequest::default()
        }
    }

    #[test]
    fn test_subject_with_leak() {
        let record = lead(LeadCaptureRequest {
            context_data: Some(LeakInputs::default()),
            ..base()
        });
        assert_eq!(
            lead_subject(Brand::Topleads, &record),
            "New Topleads Lead: Sipho's Plumbing (R 24,000/mo Leak)"
        );
    }

    #[test]
    fn test_subject_without_leak() {
        let record = lead(LeadCaptureRequest {
            company: None,
            cta_type: Some("engineering_review".into()),
            ..base()
        });
        assert_eq!(
            lead_subject(Brand::Effluentic, &record),
            "New Effluentic Lead: Sipho (engineering review)"
        );
    }

    #[test]
    fn test_body_escapes_user_input() {
        let record = lead(LeadCaptureRequest {
            project_notes: Some("<script>alert(1)</script>".into()),
            ..base()
        });
        let email = render_lead_email(Brand::Effluentic, &record);
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("Sipho&#39;s Plumbing"));
    }

    #[test]
    fn test_diagnostic_section() {
        let record = lead(LeadCaptureRequest {
            context_data: Some(LeakInputs::default()),
            ..base()
        });
        let html = render_lead_email(Brand::LeakageFinder, &record).html;
        assert!(html.contains("R 24,000 / month"));
        assert!(html.contains("page 2 plus"));
        assert!(html.contains("form only"));
        assert!(!html.contains("Project Context"));
    }
}
