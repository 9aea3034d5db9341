use askama::Template;

/// NewsML 1.1 envelope around one news item.
/// `headline` and `body` go into CDATA sections and must already be CDATA-safe.
#[derive(Template)]
#[template(path = "newsml/feed.xml")]
pub struct NewsmlTemplate {
    pub transmission_id: String,
    pub sent_at: String,
    pub date_id: String,
    pub headline: String,
    pub body: String,
}
