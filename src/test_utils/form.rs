use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a Html, form_id: &str) -> ElementRef<'a> {
    html.select(&Selector::parse(&format!("form#{form_id}")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No form found with id {form_id}"))
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_post = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_post, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_post:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );

            return;
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

/// The value of the input, select or textarea called `name`.
#[track_caller]
pub(crate) fn field_value(form: &ElementRef<'_>, name: &str) -> String {
    let input_selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    if let Some(input) = form.select(&input_selector).next() {
        return input.value().attr("value").unwrap_or_default().to_owned();
    }

    let select_selector = Selector::parse(&format!("select[name={name}] option[selected]")).unwrap();
    if let Some(option) = form.select(&select_selector).next() {
        return option.value().attr("value").unwrap_or_default().to_owned();
    }

    let textarea_selector = Selector::parse(&format!("textarea[name={name}]")).unwrap();
    if let Some(textarea) = form.select(&textarea_selector).next() {
        return textarea.text().collect();
    }

    // A select without a selected option shows its first option.
    let first_option = Selector::parse(&format!("select[name={name}] option")).unwrap();
    form.select(&first_option)
        .next()
        .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
        .unwrap_or_else(|| panic!("No field found with name \"{name}\""))
}

/// The values of the options offered by the select called `name`.
pub(crate) fn select_options(form: &ElementRef<'_>, name: &str) -> Vec<String> {
    form.select(&Selector::parse(&format!("select[name={name}] option")).unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
        .collect()
}

/// The inline error rendered for the field with the id `field_id`.
pub(crate) fn field_error(form: &ElementRef<'_>, field_id: &str) -> Option<String> {
    form.select(&Selector::parse(&format!("#{field_id}-error")).unwrap())
        .next()
        .map(|error| error.text().collect::<String>().trim().to_owned())
}

#[track_caller]
pub(crate) fn assert_field_error(form: &ElementRef<'_>, field_id: &str, want: &str) {
    let got = field_error(form, field_id);

    assert_eq!(
        got.as_deref(),
        Some(want),
        "want error {want:?} for field {field_id}, got {got:?}"
    );
}

/// The names echoed back in the hidden `touched` inputs.
pub(crate) fn touched_fields(form: &ElementRef<'_>) -> Vec<String> {
    form.select(&Selector::parse("input[type=hidden][name=touched]").unwrap())
        .map(|input| input.value().attr("value").unwrap_or_default().to_owned())
        .collect()
}

/// The kind ("success" or "error") and message of the banner in the form.
pub(crate) fn form_alert(form: &ElementRef<'_>) -> Option<(String, String)> {
    let alert = form
        .select(&Selector::parse("[data-alert]").unwrap())
        .next()?;
    let kind = alert.value().attr("data-alert").unwrap_or_default().to_owned();
    let message = alert
        .select(&Selector::parse(".alert-message").unwrap())
        .next()
        .map(|message| message.text().collect::<String>())
        .unwrap_or_default();

    Some((kind, message))
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    let got_text = got_text.trim();
    assert_eq!(text, got_text);
}
