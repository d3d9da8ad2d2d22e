// src/pages/layout.rs

use crate::pages::format::escape_html;

// ==================== Template Functions ====================

const NAV: [(&str, &str); 5] = [
    ("/", "Dashboard"),
    ("/reports/products", "Top Productos"),
    ("/reports/customers", "Clientes"),
    ("/reports/inventory", "Inventario"),
    ("/reports/payments", "Pagos"),
];

/// Página completa: sidebar + conteúdo.
pub fn base_html(title: &str, active_path: &str, content: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV {
        let class = if href == active_path {
            "block px-4 py-2 bg-[#4E342E] text-white"
        } else {
            "block px-4 py-2 text-[#E5DCC5] hover:bg-[#4E342E]"
        };
        nav.push_str(&format!(r#"<a href="{}" class="{}">{}</a>"#, href, class, label));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Cafeteria Reportes</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-[#FAF7F2] text-[#3E2723]">
<div class="flex min-h-screen">
    <aside class="w-56 bg-[#2C1810] py-6">
        <p class="px-4 mb-6 text-lg font-bold text-white">Cafeteria</p>
        <nav class="space-y-1">{}</nav>
    </aside>
    <main class="flex-1 p-8">{}</main>
</div>
</body>
</html>"#,
        escape_html(title),
        nav,
        content
    )
}

pub fn page_header(title: &str, subtitle: &str) -> String {
    format!(
        r#"<div class="mb-8"><h1 class="text-2xl font-bold text-[#3E2723]">{}</h1><p class="text-[#8D6E63] mt-1">{}</p></div>"#,
        escape_html(title),
        escape_html(subtitle)
    )
}

/// Estado "carregando": o contêiner pede o próprio fragmento assim que entra na página.
/// `hx-sync` com `replace` aborta o pedido anterior quando chega um novo.
pub fn loading_container(id: &str, fragment_url: &str) -> String {
    format!(
        r#"<div id="{id}" hx-get="{url}" hx-trigger="load" hx-swap="innerHTML" hx-sync="this:replace"><div class="p-8 text-center text-[#8D6E63]">Cargando...</div></div>"#,
        id = id,
        url = escape_html(fragment_url)
    )
}

pub fn kpi_card(title: &str, value: &str, label: Option<&str>) -> String {
    let label = label
        .map(|l| format!(r#"<p class="mt-2 text-sm text-[#8D6E63]">{}</p>"#, escape_html(l)))
        .unwrap_or_default();
    format!(
        r#"<div class="bg-white border border-[#E5DCC5] p-6"><h3 class="text-sm font-medium text-[#8D6E63] uppercase tracking-wide">{}</h3><div class="mt-2"><span class="text-3xl font-bold text-[#3E2723]">{}</span></div>{}</div>"#,
        escape_html(title),
        escape_html(value),
        label
    )
}

pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="bg-[#FAF7F2] border border-[#E5DCC5] text-[#3E2723] px-4 py-3 mb-6">{}</div>"#,
        escape_html(message)
    )
}

/// Coluna de tabela. `render` devolve HTML já escapado.
pub struct Column<T> {
    pub header: &'static str,
    pub render: fn(&T) -> String,
}

pub fn report_table<T>(columns: &[Column<T>], rows: &[T], empty_message: &str) -> String {
    let mut html = String::from(
        r#"<div class="bg-white border border-[#E5DCC5] overflow-x-auto"><table class="w-full"><thead class="bg-[#FAF7F2]"><tr>"#,
    );
    for column in columns {
        html.push_str(&format!(
            r#"<th class="px-4 py-3 text-left text-sm font-semibold text-[#3E2723]">{}</th>"#,
            column.header
        ));
    }
    html.push_str("</tr></thead><tbody>");

    if rows.is_empty() {
        html.push_str(&format!(
            r#"<tr><td class="px-4 py-8 text-center text-[#8D6E63]" colspan="{}">{}</td></tr>"#,
            columns.len(),
            escape_html(empty_message)
        ));
    }

    for row in rows {
        html.push_str(r#"<tr class="border-t border-[#E5DCC5]">"#);
        for column in columns {
            html.push_str(&format!(r#"<td class="px-4 py-3 text-sm">{}</td>"#, (column.render)(row)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Botões Anterior/Siguiente. `link` monta (url do fragmento, url da página) para um número de página.
pub fn pagination_controls<F>(target_id: &str, page: i64, total_pages: i64, link: F) -> String
where
    F: Fn(i64) -> (String, String),
{
    if total_pages <= 1 {
        return String::new();
    }

    let button = |label: &str, to: i64, disabled: bool| {
        let (fragment, page_url) = link(to);
        format!(
            r##"<button class="px-4 py-2 border border-[#E5DCC5] text-[#3E2723] hover:bg-white disabled:opacity-50" hx-get="{}" hx-target="#{}" hx-sync="#{}:replace" hx-push-url="{}"{}>{}</button>"##,
            escape_html(&fragment),
            target_id,
            target_id,
            escape_html(&page_url),
            if disabled { " disabled" } else { "" },
            label
        )
    };

    format!(
        r#"<div class="mt-6 flex justify-center gap-2">{}<span class="px-4 py-2 text-[#8D6E63]">Pagina {} de {}</span>{}</div>"#,
        button("Anterior", (page - 1).max(1), page <= 1),
        page,
        total_pages,
        button("Siguiente", (page + 1).min(total_pages), page >= total_pages)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![Column {
            header: "Producto",
            render: |r: &Row| escape_html(r.name),
        }]
    }

    #[test]
    fn empty_table_shows_the_message() {
        let html = report_table(&columns(), &[], "No hay productos disponibles");
        assert!(html.contains("No hay productos disponibles"));
        assert!(html.contains("<th"));
    }

    #[test]
    fn cells_are_rendered_per_row() {
        let rows = [Row { name: "Latte" }, Row { name: "<Mocha>" }];
        let html = report_table(&columns(), &rows, "vacio");
        assert!(html.contains("Latte"));
        assert!(html.contains("&lt;Mocha&gt;"));
        assert!(!html.contains("vacio"));
    }

    #[test]
    fn single_page_has_no_controls() {
        assert_eq!(pagination_controls("report", 1, 1, |_| (String::new(), String::new())), "");
    }

    #[test]
    fn controls_disable_the_edges() {
        let html = pagination_controls("report", 1, 3, |p| {
            (format!("/fragments/x?page={}", p), format!("/x?page={}", p))
        });
        assert!(html.contains("Pagina 1 de 3"));
        assert!(html.contains(r#"hx-get="/fragments/x?page=2""#));
        assert!(html.contains("hx-sync=\"#report:replace\""));
        assert_eq!(html.matches(" disabled>").count(), 1);
    }
}
