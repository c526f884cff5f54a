// src/chat/formatter.rs

use crate::{
    chat::record::{FieldValue, Record},
    models::{
        chat::{ChatSettings, DataKind, DetailLevel, DisplayFormat},
        Collection,
    },
};

pub const NO_DATA_MESSAGE: &str = "Je suis désolé, je n'ai trouvé aucune information correspondant à votre recherche dans la base de données. Pouvez-vous reformuler votre question ?";

pub const RESULTS_HEADER: &str = "📊 Résultats de la base de données";

const CHART_WIDTH: f64 = 20.0;
const SUMMARY_PREVIEW: usize = 5;

/// Natureza dos dados, pelo primeiro registro.
pub fn classify(records: &[Record]) -> DataKind {
    let Some(first) = records.first() else {
        return DataKind::Textual;
    };
    if first.timeline_date().is_some() {
        return DataKind::Temporal;
    }

    let fields = first.fields();
    let count = |pred: fn(&FieldValue) -> bool| fields.iter().filter(|f| pred(&f.value)).count();
    let numbers = count(|v| matches!(v, FieldValue::Number(_)));
    let texts = count(|v| matches!(v, FieldValue::Text(_)));
    let categories = count(|v| matches!(v, FieldValue::Category(_)));

    if numbers > texts {
        DataKind::Numerical
    } else if categories > 0 && texts <= 3 {
        DataKind::Categorical
    } else {
        DataKind::Textual
    }
}

/// Formato pedido explicitamente na mensagem ("en tableau", "graphique"...).
pub fn requested_format(message: &str) -> Option<DisplayFormat> {
    let message = message.to_lowercase();
    let asks = |phrases: &[&str]| phrases.iter().any(|p| message.contains(p));

    if asks(&["en liste", "sous forme de liste"]) {
        Some(DisplayFormat::List)
    } else if asks(&["en tableau", "sous forme de tableau"]) {
        Some(DisplayFormat::Table)
    } else if asks(&["graphique"]) {
        Some(DisplayFormat::Chart)
    } else if asks(&["chronologie", "frise"]) {
        Some(DisplayFormat::Timeline)
    } else if asks(&["en résumé", "résumé"]) {
        Some(DisplayFormat::Summary)
    } else {
        None
    }
}

/// Pedido explícito > preferência salva > nível de detalhe > quantidade.
/// Gráfico e cronologia só saem de um pedido ou de uma preferência.
pub fn choose_format(
    kind: DataKind,
    count: usize,
    requested: Option<DisplayFormat>,
    settings: &ChatSettings,
) -> DisplayFormat {
    if let Some(format) = requested {
        return format;
    }
    if let Some(format) = settings.format_preferences.get(&kind) {
        return *format;
    }

    match settings.detail_level {
        DetailLevel::Low if count > 5 => return DisplayFormat::Summary,
        DetailLevel::High if count > 20 => return DisplayFormat::Table,
        _ => {}
    }

    match count {
        0..=5 => DisplayFormat::List,
        6..=20 => DisplayFormat::Table,
        _ => DisplayFormat::Summary,
    }
}

fn is_chartable(records: &[Record]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.chart_point().is_some())
}

/// Escolhe o formato e desenha os registros de uma coleção.
pub fn format_records(records: &[Record], message: &str, settings: &ChatSettings) -> String {
    if records.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let chartable = is_chartable(records);
    let format = choose_format(classify(records), records.len(), requested_format(message), settings);

    match format {
        DisplayFormat::List => render_list(records),
        DisplayFormat::Table => render_table(records),
        DisplayFormat::Chart if chartable => render_chart(records),
        DisplayFormat::Chart => render_table(records),
        DisplayFormat::Timeline if records.iter().any(|r| r.timeline_date().is_some()) => {
            render_timeline(records)
        }
        DisplayFormat::Timeline => render_list(records),
        DisplayFormat::Summary => render_summary(records),
    }
}

/// Resposta do modo "base de dados": uma seção por coleção.
pub fn format_results(
    sections: &[(Collection, Vec<Record>)],
    message: &str,
    settings: &ChatSettings,
) -> String {
    let sections: Vec<_> = sections.iter().filter(|(_, records)| !records.is_empty()).collect();
    if sections.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut out = format!("{RESULTS_HEADER}\n\n");
    for (collection, records) in sections {
        out.push_str(&format!("### {} ({})\n\n", collection, records.len()));
        out.push_str(&format_records(records, message, settings));
        out.push('\n');
    }
    out
}

pub fn render_list(records: &[Record]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let line: Vec<String> = record
            .fields()
            .into_iter()
            .filter(|f| !f.value.is_empty())
            .map(|f| format!("{}: {}", f.name, f.value))
            .collect();
        out.push_str(&format!("{}. {}\n", i + 1, line.join(", ")));
    }
    out
}

pub fn render_table(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.fields().iter().map(|f| f.name).collect();

    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!("|{}|\n", vec!["---"; headers.len()].join("|")));

    for record in records {
        let cells: Vec<String> = record.fields().iter().map(|f| f.value.to_string()).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

pub fn render_chart(records: &[Record]) -> String {
    let points: Vec<(String, f64)> = records.iter().filter_map(Record::chart_point).collect();
    let max = points.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max);

    let mut out = String::from("📊 Graphique\n\n");
    for (label, value) in points {
        let length = if max > 0.0 {
            (value.abs() / max * CHART_WIDTH).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<15} {} {}\n",
            label,
            "█".repeat(length),
            FieldValue::Number(value)
        ));
    }
    out
}

pub fn render_timeline(records: &[Record]) -> String {
    let mut dated: Vec<&Record> = records.iter().collect();
    // Sem data vai para o fim
    dated.sort_by_key(|r| (r.timeline_date().is_none(), r.timeline_date()));

    let mut out = String::from("📅 Chronologie\n\n");
    for record in dated {
        let skip = record.timeline_field();
        let details: Vec<String> = record
            .fields()
            .into_iter()
            .filter(|f| !f.value.is_empty() && Some(f.name) != skip)
            .map(|f| format!("{}: {}", f.name, f.value))
            .collect();

        match record.timeline_date() {
            Some(date) => out.push_str(&format!("{}\n", date.format("%d/%m/%Y"))),
            None => out.push_str("Date inconnue\n"),
        }
        out.push_str(&format!("└─ {}\n", details.join(", ")));
    }
    out
}

pub fn render_summary(records: &[Record]) -> String {
    let total = records.len();
    let preview = &records[..total.min(SUMMARY_PREVIEW)];

    let mut out = format!(
        "Total : {total} enregistrements\n\nAperçu ({} premiers) :\n",
        preview.len()
    );
    out.push_str(&render_table(preview));
    if total > SUMMARY_PREVIEW {
        out.push_str(&format!("\n… et {} autres\n", total - SUMMARY_PREVIEW));
    }
    out
}
