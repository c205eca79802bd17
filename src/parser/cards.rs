use super::records::RecordFields;

/// Render one `project-card` article per record, in order.
pub fn render_cards(records: &[RecordFields]) -> String {
    records.iter().map(render_card).collect()
}

fn render_card(r: &RecordFields) -> String {
    format!(
        r#"
      <article class="project-card">
        <img src="{img}" alt="{title}">
        <div class="project-meta">
          <h3>{title}</h3>
          <p>{excerpt}</p>
        </div>
      </article>
    "#,
        img = r.image_url,
        title = r.title,
        excerpt = r.excerpt,
    )
}
