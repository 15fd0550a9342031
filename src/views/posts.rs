use super::{escape, layout};
use crate::remote::{Post, Tag};
use crate::posts::PostsView;

/// Renders either the post grid or the error state.
pub fn posts_page(view: &PostsView) -> String {
    match view {
        PostsView::Error(message) => layout(
            "Posts",
            &format!(
                "<main>\n<h1>Error</h1>\n<p class=\"error\">{}</p>\n</main>",
                escape(message)
            ),
        ),
        PostsView::Page(page) => {
            let cards: String = page.rows.iter().map(post_card).collect();
            layout(
                "Posts",
                &format!(
                    "<main>\n<h1>All Posts</h1>\n<p>Showing {} of {} posts</p>\n\
                     <section class=\"posts\">\n{}</section>\n</main>",
                    page.rows.len(),
                    page.count,
                    cards
                ),
            )
        }
    }
}

fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn tag_list(label: &str, tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let names: Vec<String> = tags.iter().map(|t| escape(&t.name)).collect();
    format!("<p class=\"tags\">{}: {}</p>\n", label, names.join(", "))
}

fn post_card(post: &Post) -> String {
    let dates = match (&post.from_date, &post.to_date) {
        (Some(from), Some(to)) => format!(
            "<p class=\"dates\">{} to {}</p>\n",
            escape(from),
            escape(to)
        ),
        (Some(from), None) => format!("<p class=\"dates\">From {}</p>\n", escape(from)),
        _ => String::new(),
    };

    format!(
        "<article class=\"post\" data-id=\"{id}\">\n\
         <header><span class=\"avatar\">{initial}</span> {author} \
         <small>{kind} &middot; {visibility} &middot; {created}</small></header>\n\
         <p>{description}</p>\n{dates}{destinations}{hotels}{restaurants}\
         <footer>{likes} likes &middot; {comments} comments</footer>\n\
         </article>\n",
        id = post.id,
        initial = escape(&initial(&post.account.full_name)),
        author = escape(&post.account.full_name),
        kind = escape(&post.kind),
        visibility = escape(&post.visibility),
        created = escape(&post.created_at),
        description = escape(&post.description),
        dates = dates,
        destinations = tag_list("Destinations", &post.tag_destinations),
        hotels = tag_list("Hotels", &post.tag_hotels),
        restaurants = tag_list("Restaurants", &post.tag_restaurants),
        likes = post.likes,
        comments = post.comments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Account, PostPage};

    fn post(id: i64, author: &str) -> Post {
        Post {
            id,
            description: "A <b>great</b> trip".to_string(),
            kind: "photo".to_string(),
            likes: 3,
            comments: 1,
            account: Account {
                full_name: author.to_string(),
            },
            tag_hotels: vec![Tag {
                id: 9,
                name: "Grand".to_string(),
            }],
            ..Post::default()
        }
    }

    #[test]
    fn page_shows_counts_and_escaped_cards() {
        let view = PostsView::Page(PostPage {
            rows: vec![post(1, "ada"), post(2, "bo")],
            count: 10,
        });
        let html = posts_page(&view);

        assert!(html.contains("Showing 2 of 10 posts"));
        assert!(html.contains("<span class=\"avatar\">A</span> ada"));
        assert!(html.contains("A &lt;b&gt;great&lt;/b&gt; trip"));
        assert!(html.contains("Hotels: Grand"));
        assert!(!html.contains("Destinations:"));
    }

    #[test]
    fn error_state_replaces_the_grid() {
        let html = posts_page(&PostsView::Error("Failed to fetch posts".to_string()));
        assert!(html.contains("Failed to fetch posts"));
        assert!(!html.contains("Showing"));
    }

    #[test]
    fn author_without_name_has_no_initial() {
        assert_eq!(initial(""), "");
        assert_eq!(initial("émile"), "É");
    }
}
