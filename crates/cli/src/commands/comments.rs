//! Comment commands: `comments`, `comment`.

use tienda_core::{Comment, ProductId};
use tienda_storefront::api::ApiClient;
use tienda_storefront::config::ClientConfig;
use tienda_storefront::state::CommentWidget;

fn comment_block(comment: &Comment) -> String {
    format!("{} · {}\n  {}", comment.author, comment.date, comment.body)
}

/// Mount the widget for `product_id` the way the page does: placeholders
/// first, then whatever the backend has.
async fn mount(client: &ApiClient, config: &ClientConfig, product_id: ProductId) -> CommentWidget {
    let mut widget = CommentWidget::new(product_id, client.current_user())
        .with_default_author(&config.default_author);
    widget.load(client).await;
    widget
}

#[allow(clippy::print_stdout)]
fn print_comments(widget: &CommentWidget) {
    for comment in widget.comments() {
        println!("{}", comment_block(comment));
    }
}

/// Print the comments for a product.
pub async fn list(client: &ApiClient, config: &ClientConfig, product_id: ProductId) {
    let widget = mount(client, config, product_id).await;
    print_comments(&widget);
}

/// Submit `text` as a comment and print the notice and the updated list.
#[allow(clippy::print_stdout)]
pub async fn post(client: &ApiClient, config: &ClientConfig, product_id: ProductId, text: String) {
    let mut widget = mount(client, config, product_id).await;
    widget.set_draft(text);

    let notice = widget.submit(client).await;
    println!("{}", notice.message());
    if notice.is_posted() {
        print_comments(&widget);
    }
}

#[cfg(test)]
mod tests {
    use tienda_core::CommentId;

    use super::*;

    #[test]
    fn test_comment_block() {
        let comment = Comment {
            id: CommentId::new(1),
            author: "Pao".to_string(),
            body: "Muy rápido".to_string(),
            date: "23 Nov 2025".to_string(),
            product_id: None,
        };
        assert_eq!(comment_block(&comment), "Pao · 23 Nov 2025\n  Muy rápido");
    }
}
