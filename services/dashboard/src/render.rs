//! HTML rendering for the two dashboard screens.
//!
//! Pages are plain server-rendered HTML. Every selection control lives in a
//! single GET form targeting `/results`, so changing one value re-evaluates
//! the whole pipeline with the others kept.

use std::fmt::Write;

use crop_common::schema::{ENVIRONMENT_DISPLAY, INVESTMENT_DISPLAY};
use crop_common::{CropRecord, FilterColumn};
use recommender::{FilterOptions, Recommendation};

use crate::assets::{encode_data_uri, Backgrounds};
use crate::config::TextConfig;
use crate::upload::UploadedImage;

pub const NO_INVESTMENT_MATCH: &str =
    "No crops match the selected investment criteria. Please adjust your inputs.";
pub const NO_ENVIRONMENT_MATCH: &str =
    "No crops match the environmental criteria. Please adjust your inputs.";
pub const NO_COMMON_CROPS: &str =
    "No common crops found between investment/soil and environmental/nutrient-based recommendations.";
pub const NO_COMMON_ADVICE: &str = "You may need to adjust your inputs or compare the crops \
     recommended in each section.";
pub const NO_UPLOAD: &str = "Please upload an image.";

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            color: #f5f5f5;
            background-size: cover;
            background-position: top left;
            background-repeat: no-repeat;
            background-attachment: fixed;
            display: flex;
            min-height: 100vh;
        }
        aside {
            width: 320px;
            padding: 24px;
            background-size: cover;
            background-repeat: no-repeat;
            background-position: center;
        }
        main { flex: 1; padding: 32px 48px; background: rgba(0, 0, 0, 0.45); }
        h1 { margin-top: 0; }
        label { display: block; margin: 12px 0 4px; font-weight: 600; }
        select { min-width: 320px; padding: 6px; }
        table { border-collapse: collapse; margin: 12px 0; background: rgba(255, 255, 255, 0.92); color: #222; }
        th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; }
        th { background: #e8f1e4; }
        .message { padding: 10px 14px; border-left: 4px solid #e0a800; background: rgba(0, 0, 0, 0.5); }
        .notice { color: #ffb4a8; }
        button { margin-top: 16px; padding: 8px 24px; font-size: 1rem; cursor: pointer; }
        figure { margin: 12px 0; }
        figure img { width: 100%; }
"#;

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, backgrounds: &Backgrounds, sidebar: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body style="background-image: url('{page_bg}')">
    <aside style="background-image: url('{sidebar_bg}')">
{sidebar}
    </aside>
    <main>
{main}
    </main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        page_bg = backgrounds.page,
        sidebar_bg = backgrounds.sidebar,
        sidebar = sidebar,
        main = main,
    )
}

/// The introduction screen.
pub fn home_page(text: &TextConfig, backgrounds: &Backgrounds) -> String {
    let main = format!(
        r#"<h1>{title}</h1>
<h3>Beyond basic monitoring, the system leverages AI to offer personalized crop recommendations tailored to the specific conditions of the farm, including:</h3>
<ul>
    <li><strong>Soil type</strong></li>
    <li><strong>Available investment</strong></li>
    <li><strong>Climatic conditions</strong></li>
    <li><strong>Seasonal factors</strong></li>
</ul>
<p>To maximize the farmer's return on investment, the system provides <strong>strategic advice on the optimal locations and times</strong> to sell the harvested crops, ensuring the highest possible profit for the farmer.</p>
<form method="post" action="/go">
    <button type="submit">Go</button>
</form>"#,
        title = escape(&text.home_title),
    );

    let sidebar = format!(
        "<h1>About this Application</h1>\n<p>{}</p>",
        escape(&text.about)
    );

    page(&text.home_title, backgrounds, &sidebar, &main)
}

/// What the results screen shows in its main column.
#[derive(Debug)]
pub enum ResultsBody<'a> {
    /// A selection control has nothing to offer; nothing is evaluated.
    NoOptions(String),

    /// The pipeline ran with these resolved selections.
    Evaluated {
        selections: &'a [(FilterColumn, String)],
        recommendation: &'a Recommendation<'a>,
    },
}

/// Everything needed to draw the results screen.
pub struct ResultsView<'a> {
    pub text: &'a TextConfig,
    pub backgrounds: &'a Backgrounds,
    pub options: &'a FilterOptions,
    pub body: ResultsBody<'a>,
    pub upload: Option<&'a UploadedImage>,
    pub upload_notice: Option<&'a str>,
}

impl ResultsView<'_> {
    pub fn render(&self) -> String {
        let mut main = format!("<h1>{}</h1>\n", escape(&self.text.results_title));

        let query = match &self.body {
            ResultsBody::NoOptions(message) => {
                let _ = writeln!(main, r#"<p class="message">{}</p>"#, escape(message));
                String::new()
            }
            ResultsBody::Evaluated {
                selections,
                recommendation,
            } => {
                main.push_str(&self.evaluated(selections, recommendation));
                selection_query(selections)
            }
        };

        main.push_str(
            r#"<form method="post" action="/home">
    <button type="submit">Home</button>
</form>"#,
        );

        page(
            &self.text.results_title,
            self.backgrounds,
            &self.sidebar(&query),
            &main,
        )
    }

    fn evaluated(
        &self,
        selections: &[(FilterColumn, String)],
        recommendation: &Recommendation<'_>,
    ) -> String {
        let selected = |column: FilterColumn| {
            selections
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, v)| v.as_str())
        };

        let mut html = String::from(r#"<form method="get" action="/results">"#);
        html.push('\n');
        html.push_str("<h2>Investment and Soil-based Crop Recommendations</h2>\n");
        for column in FilterColumn::INVESTMENT_PATH {
            html.push_str(&self.select(column, selected(column)));
        }

        let (investment, environment, common) = match recommendation {
            Recommendation::NoInvestmentMatch => {
                let _ = writeln!(html, r#"<p class="message">{}</p>"#, NO_INVESTMENT_MATCH);
                // Keep the environment choices across resubmission.
                for column in FilterColumn::ENVIRONMENT_PATH {
                    if let Some(value) = selected(column) {
                        let _ = writeln!(
                            html,
                            r#"<input type="hidden" name="{}" value="{}">"#,
                            column.query_key(),
                            escape(value)
                        );
                    }
                }
                html.push_str(APPLY_BUTTON);
                html.push_str("</form>\n");
                return html;
            }
            Recommendation::Complete {
                investment,
                environment,
                common,
            } => (investment, environment, common),
        };

        html.push_str(
            "<h3>Recommended Crops Based on Investment, Soil, and Environmental Criteria</h3>\n",
        );
        html.push_str(&table(investment, &INVESTMENT_DISPLAY));

        html.push_str("<h2>Additional Nutrient, Temperature, and pH-based Crop Recommendations</h2>\n");
        for column in FilterColumn::ENVIRONMENT_PATH {
            html.push_str(&self.select(column, selected(column)));
        }
        html.push_str(APPLY_BUTTON);
        html.push_str("</form>\n");

        if environment.is_empty() {
            let _ = writeln!(html, r#"<p class="message">{}</p>"#, NO_ENVIRONMENT_MATCH);
        } else {
            html.push_str("<h3>Recommended Crops Based on Environmental Criteria</h3>\n");
            html.push_str(&table(environment, &ENVIRONMENT_DISPLAY));
        }

        html.push_str("<h2>Final Recommendation</h2>\n");
        if common.is_empty() {
            let _ = writeln!(html, "<h3>{}</h3>", NO_COMMON_CROPS);
            let _ = writeln!(html, "<p>{}</p>", NO_COMMON_ADVICE);
        } else {
            html.push_str("<h3>Final Recommended Crops</h3>\n");
            for crop in common.iter() {
                let _ = writeln!(html, "<p><strong>Crop</strong>: {}</p>", escape(crop));
            }
        }

        html
    }

    fn select(&self, column: FilterColumn, selected: Option<&str>) -> String {
        let list = self.options.get(column);
        let key = column.query_key();
        let mut html = format!(
            "<label for=\"{key}\">{label}</label>\n<select id=\"{key}\" name=\"{key}\" onchange=\"this.form.submit()\">\n",
            key = key,
            label = escape(column.label()),
        );
        for value in list.values() {
            let marker = if Some(value.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(
                html,
                r#"    <option value="{v}"{marker}>{v}</option>"#,
                v = escape(value),
                marker = marker,
            );
        }
        html.push_str("</select>\n");
        html
    }

    fn sidebar(&self, query: &str) -> String {
        let mut html = String::from(
            r#"<h1>crop growing suggestions</h1>
<h2>we can monitor your crops</h2>
<p>Upload an image of your crops below.</p>
"#,
        );

        let _ = write!(
            html,
            r#"<form method="post" action="/results/upload" enctype="multipart/form-data">
    <label for="image">Upload an image</label>
    <input id="image" type="file" name="image" accept=".jpg,.jpeg,.png">
    <input type="hidden" name="query" value="{}">
    <button type="submit">Upload</button>
</form>
"#,
            escape(query)
        );

        if let Some(notice) = self.upload_notice {
            let _ = writeln!(html, r#"<p class="notice">{}</p>"#, escape(notice));
        }

        match self.upload {
            Some(image) => {
                let _ = write!(
                    html,
                    r#"<figure>
    <img src="{src}" alt="Uploaded Image">
    <figcaption>Uploaded Image</figcaption>
</figure>
<p>Image format: {format}</p>
<p>Image size: {size}</p>
"#,
                    src = encode_data_uri(image.content_type(), &image.bytes),
                    format = image.format_label(),
                    size = image.size_label(),
                );
            }
            None => {
                let _ = writeln!(html, "<p>{}</p>", NO_UPLOAD);
            }
        }

        html
    }
}

const APPLY_BUTTON: &str = "<noscript><button type=\"submit\">Apply</button></noscript>\n";

fn table(records: &[&CropRecord], columns: &[&str]) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for column in columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for record in records {
        html.push_str("<tr>");
        for column in columns {
            let cell = record.display(column).unwrap_or_default();
            let _ = write!(html, "<td>{}</td>", escape(&cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Query string reproducing a set of selections.
pub fn selection_query(selections: &[(FilterColumn, String)]) -> String {
    selections
        .iter()
        .map(|(column, value)| format!("{}={}", column.query_key(), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Standalone error page. Does not depend on any asset being readable.
pub fn error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body style="background: #1d2b1f">
    <main>
        <h1>{title}</h1>
        <p class="message">{message}</p>
        <form method="post" action="/home">
            <button type="submit">Home</button>
        </form>
    </main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        message = escape(message),
    )
}
