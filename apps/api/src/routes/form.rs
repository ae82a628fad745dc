use axum::response::Html;

/// (input id, label, form field name, pre-filled value)
const FIELDS: [(&str, &str, &str, &str); 8] = [
    ("company", "Company", "return_address[company]", "CODE Internet Applications"),
    ("address", "Address", "return_address[address]", "Frederik Matthesstraat 30"),
    ("zip_code", "Zip Code", "return_address[zip_code]", "2613 ZZ"),
    ("city", "City", "return_address[city]", "Delft"),
    ("country", "Country", "return_address[country]", "The Netherlands"),
    ("order", "Order", "order", "CODE-1339"),
    ("name", "Name", "name", "Test User"),
    ("language", "Language", "language", "en"),
];

/// GET /
/// A pre-filled form that posts to `/get-label`, for trying the service by hand.
pub async fn form_handler() -> Html<String> {
    Html(render_form())
}

fn render_form() -> String {
    let inputs: String = FIELDS
        .iter()
        .map(|(id, label, name, value)| {
            format!(
                "    <label for=\"{id}\">{label}:</label>\n    \
                 <input type=\"text\" id=\"{id}\" name=\"{name}\" value=\"{value}\"><br><br>\n"
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Shipping label</title></head>\n<body>\n  \
         <form action=\"/get-label\" method=\"post\">\n{inputs}    \
         <button type=\"submit\">Submit</button>\n  </form>\n</body>\n</html>\n"
    )
}
