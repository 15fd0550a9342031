use super::{escape, layout};

/// The login form, optionally with the message of a failed attempt and the
/// email to pre-fill.
pub fn login_page(error: Option<&str>, email: &str) -> String {
    let error_block = error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape(message)))
        .unwrap_or_default();

    let body = format!(
        "<main>\n<h1>Sign in</h1>\n{error_block}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>\n</main>",
        escape(email)
    );
    layout("Sign in", &body)
}
