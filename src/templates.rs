//! Sample letter templates for testing and demonstration.
//!
//! Each template exercises a different part of the template syntax.

/// Full cover letter using every placeholder, both conditional blocks and an
/// abbreviation definition.
pub fn cover_letter_template() -> &'static str {
    r##"# Cover Letter for {{APPLYING_COMPANY}}

**{{NAME}}**
{{LOCATION}}
{{EMAIL}} | {{PHONE}}
[LinkedIn]({{LINKEDIN}}) | [GitHub]({{GITHUB}}) | [Portfolio]({{PORTFOLIO}})

{{current_date}}

Dear {{HIRING_MANAGER_NAME}},

I'm writing to apply for the {{JOB_TITLE}} role. I've spent my career in {{FIELD_OF_EXPERTISE}},
mostly building {{GENERAL_PROJECT_TYPE}} with {{TECH_STACK}}.

{{#IF APPLYING_COMPANY}}
What draws me to {{APPLYING_COMPANY}} is {{WHAT_ATTRACTS_YOU}}. Your mission -- {{COMPANY_GOAL_OR_MISSION}} -- matches
how I like to work, and {{POSITIVE_NOTE_ABOUT_COMPANY}}.
{{/IF}}

At {{CURRENT_COMPANY}} I delivered {{SHORT_PROJECT_OR_IMPACT}}.
{{#IF KEY_PROJECT}}
One project I'm proud of is {{KEY_PROJECT}}: {{CONTRIBUTION_SUMMARY}}
{{/IF}}

I'd welcome the chance to talk about how I can help your team ship reliable APIs.

Sincerely,
{{NAME}}

*[APIs]: Application Programming Interfaces
"##
}

/// The smallest useful letter: a heading and a greeting.
pub fn minimal_template() -> &'static str {
    "# Cover Letter\n\nDear {{HIRING_MANAGER_NAME}},\n\nRegards,\n{{NAME}}\n"
}

/// Adjacent and nested conditional blocks, plus an unrecognised one.
pub fn conditional_template() -> &'static str {
    r##"Intro
{{#IF APPLYING_COMPANY}}About {{APPLYING_COMPANY}}.{{/IF}}
{{#IF KEY_PROJECT}}Project {{KEY_PROJECT}}{{#IF APPLYING_COMPANY}} for {{APPLYING_COMPANY}}{{/IF}}.{{/IF}}
{{#IF PHONE}}Call {{PHONE}}{{/IF}}
Outro"##
}

/// Stylesheet paired with [`cover_letter_template`].
pub fn sample_stylesheet() -> &'static str {
    r#"body { font-family: Georgia, serif; font-size: 11pt; }
#letter { max-width: 40em; margin: 0 auto; }
h1 { font-size: 14pt; }
"#
}
