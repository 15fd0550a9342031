use super::{escape, layout};

pub fn home_page() -> String {
    layout(
        "Customer portal",
        "<main>\n<h1>Customer portal</h1>\n<nav>\n\
         <a href=\"/login\">Sign in</a>\n<a href=\"/profile\">Profile</a>\n\
         <a href=\"/accounts\">Accounts</a>\n<a href=\"/posts\">Posts</a>\n\
         </nav>\n</main>",
    )
}

pub fn profile_page() -> String {
    layout(
        "Profile",
        "<main>\n<h1>Profile</h1>\n<p>You are signed in.</p>\n\
         <a href=\"/posts\">Posts</a>\n<a href=\"/accounts\">Accounts</a>\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Sign out</button></form>\n\
         </main>",
    )
}

pub fn accounts_page(account_id: Option<&str>) -> String {
    let title = match account_id {
        Some(id) => format!("Account {}", id),
        None => "Accounts".to_string(),
    };
    layout(
        &title,
        &format!(
            "<main>\n<h1>{}</h1>\n<a href=\"/profile\">Profile</a>\n</main>",
            escape(&title)
        ),
    )
}
