//! Section landing-page docs, in display order.

use super::{keys, KeyRole, SectionDoc, SnippetParams};
use crate::section::Section;

const REALTIME_CLIENT_ONLY: &str = "# Realtime streams are only supported by our client libraries";

/// Joins curl arguments with shell line continuations.
pub(crate) fn shell_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" \\\n")
}

/// A curl call against the auth API. `headers` follow the `apikey` header;
/// `body` is sent verbatim with `-d`.
fn auth_curl(p: &SnippetParams, method: &str, route: &str, headers: &[String], body: Option<&str>) -> String {
    let mut lines = vec![
        format!("curl -X {} '{}/auth/v1/{}'", method, p.text(keys::ENDPOINT), route),
        format!("-H \"apikey: {}\"", p.text(keys::APIKEY)),
    ];
    lines.extend(headers.iter().map(|header| format!("-H \"{}\"", header)));
    if let Some(body) = body {
        lines.push(format!("-d '{}'", body));
    }
    shell_lines(lines)
}

fn json_content() -> String {
    "Content-Type: application/json".to_string()
}

pub fn section_docs() -> Vec<SectionDoc> {
    let mut docs = introduction();
    docs.extend(user_management());
    docs.extend(entities());
    docs.extend(stored_procedures());
    docs.extend(storage());
    docs.extend(edge_functions());
    docs.extend(realtime());
    docs
}

fn introduction() -> Vec<SectionDoc> {
    vec![
        SectionDoc {
            key: "introduction",
            category: Section::Introduction,
            title: "Connect to your project",
            description: Some(
                "Projects have a RESTful endpoint that you can use with your project's API key to query and manage your database. Put these keys in your .env file.",
            ),
            key_role: KeyRole::Anon,
            js: Some(|p| {
                format!(
                    "import {{ createClient }} from '@supabase/supabase-js'\n\nconst supabaseUrl = '{}'\nconst supabaseKey = process.env.SUPABASE_KEY\nconst supabase = createClient(supabaseUrl, supabaseKey)",
                    p.text(keys::ENDPOINT)
                )
            }),
            bash: Some(|_| "# No client library required for Bash.".to_string()),
        },
        SectionDoc {
            key: "client-api-keys",
            category: Section::Introduction,
            title: "Client API Keys",
            description: Some(
                r#"Client keys allow "anonymous access" to your database, until the user has logged in. After logging in, the keys will switch to the user's own login token.

In this documentation, we will refer to the key using the name `SUPABASE_KEY`. You can find the `anon` key in the [API settings](/project/[ref]/settings/api) page."#,
            ),
            key_role: KeyRole::Anon,
            js: Some(|p| {
                format!(
                    "const SUPABASE_KEY = '{}'\nconst SUPABASE_URL = '{}'\nconst supabase = createClient(SUPABASE_URL, process.env.SUPABASE_KEY);",
                    p.text(keys::APIKEY),
                    p.text(keys::ENDPOINT)
                )
            }),
            bash: Some(|p| p.text(keys::APIKEY).into_owned()),
        },
        SectionDoc {
            key: "service-keys",
            category: Section::Introduction,
            title: "Service Keys",
            description: Some(
                r#"Service keys have *FULL* access to your data, bypassing any security policies. Be VERY careful where you expose these keys. They should only be used on a server and never on a client or browser.

In this documentation, we refer to the key using the name `SERVICE_KEY`. You can find the `service_role` key above or in the [API settings](/project/[ref]/settings/api) page."#,
            ),
            key_role: KeyRole::Service,
            js: Some(|p| {
                format!(
                    "const SUPABASE_KEY = '{}'\nconst SUPABASE_URL = '{}'\nconst supabase = createClient(SUPABASE_URL, process.env.SUPABASE_KEY);",
                    p.text(keys::APIKEY),
                    p.text(keys::ENDPOINT)
                )
            }),
            bash: Some(|p| p.text(keys::APIKEY).into_owned()),
        },
    ]
}

fn user_management() -> Vec<SectionDoc> {
    let doc = |key: &'static str, title: &'static str, description: &'static str| SectionDoc {
        key,
        category: Section::UserManagement,
        title,
        description: Some(description),
        key_role: KeyRole::Anon,
        js: None,
        bash: None,
    };

    vec![
        doc(
            "user-management",
            "Introduction",
            "Supabase makes it easy to manage your users.\n\nSupabase assigns each user a unique ID. You can reference this ID anywhere in your database. For example, you might create a `profiles` table references the user using a `user_id` field.\n\nSupabase already has built in the routes to sign up, login, and log out for managing users in your apps and websites.",
        ),
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signUp({\n  email: 'someone@email.com',\n  password: 'some-secure-password'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "signup",
                    &[json_content()],
                    Some("{\n  \"email\": \"someone@email.com\",\n  \"password\": \"some-secure-password\"\n}"),
                )
            }),
            ..doc(
                "sign-up",
                "Sign up",
                "Allow your users to sign up and create a new account.\n\nAfter they have signed up, all interactions using the Supabase client will be performed as \"that user\".",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signInWithPassword({\n  email: 'someone@email.com',\n  password: 'some-secure-password'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "token?grant_type=password",
                    &[json_content()],
                    Some("{\n  \"email\": \"someone@email.com\",\n  \"password\": \"some-secure-password\"\n}"),
                )
            }),
            ..doc(
                "email-login",
                "Log in with Email/Password",
                "If an account is created, users can login to your app.\n\nAfter they have logged in, all interactions using the Supabase JS client will be performed as \"that user\".",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signInWithOtp({\n  email: 'someone@email.com'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "magiclink",
                    &[json_content()],
                    Some("{\n  \"email\": \"someone@email.com\"\n}"),
                )
            }),
            ..doc(
                "magic-link-login",
                "Log in with Magic Link via Email",
                "Send a user a passwordless link which they can use to redeem an access_token.\n\nAfter they have clicked the link, all interactions using the Supabase JS client will be performed as \"that user\".",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signUp({\n  phone: '+13334445555',\n  password: 'some-password'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "signup",
                    &[json_content()],
                    Some("{\n  \"phone\": \"+13334445555\",\n  \"password\": \"some-password\"\n}"),
                )
            }),
            ..doc(
                "phone-log-in",
                "Sign up with Phone/Password",
                "A phone number can be used instead of an email as a primary account confirmation mechanism.\n\nThe user will receive a mobile OTP via sms with which they can verify that they control the phone number.\n\nYou must enter your own twilio credentials on the auth settings page to enable sms confirmations.",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signInWithOtp({\n  phone: '+13334445555'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(p, "POST", "otp", &[json_content()], Some("{\n  \"phone\": \"+13334445555\"\n}"))
            }),
            ..doc(
                "sms-otp-log-in",
                "Login via SMS OTP",
                "SMS OTPs work like magic links, except you have to provide an interface for the user to verify the 6 digit number they receive.\n\nYou must enter your own twilio credentials on the auth settings page to enable SMS-based Logins.",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.verifyOtp({\n  phone: '+13334445555',\n  token: '123456',\n  type: 'sms'\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "verify",
                    &[json_content()],
                    Some("{\n  \"type\": \"sms\",\n  \"phone\": \"+13334445555\",\n  \"token\": \"123456\"\n}"),
                )
            }),
            ..doc(
                "sms-verify",
                "Verify an SMS OTP",
                "Once the user has received the OTP, have them enter it in a form and send it for verification.\n\nYou must enter your own twilio credentials on the auth settings page to enable SMS-based OTP verification.",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.signInWithOAuth({\n  provider: 'github'\n})".to_string()
            }),
            bash: Some(|_| "No available command".to_string()),
            ..doc(
                "oauth-login",
                "Log in with Third Party OAuth",
                "Users can log in with Third Party OAuth like Google, Facebook, GitHub, and more. You must first enable each of these in the Auth Providers settings [here](https://supabase.com).\n\nView all the available [Third Party OAuth providers](https://supabase.com).\n\nAfter they have logged in, all interactions using the Supabase JS client will be performed as \"that user\".\n\nGenerate your Client ID and secret from: [Google](https://console.developers.google.com/apis/credentials), [Github](https://github.com/settings/applications/new), [Gitlab](https://gitlab.com/oauth/applications), [Facebook](https://developers.facebook.com/apps), and [Bitbucket](https://support.atlassian.com/bitbucket-cloud/docs/use-oauth-on-bitbucket-cloud).",
            )
        },
        SectionDoc {
            js: Some(|_| "const { data: { user } } = await supabase.auth.getUser()".to_string()),
            bash: Some(|p| {
                auth_curl(p, "GET", "user", &["Authorization: Bearer USER_TOKEN".to_string()], None)
            }),
            ..doc("get-user", "Get user", "Get the JSON object for the logged in user.")
        },
        SectionDoc {
            js: Some(|_| "const { data, error } = await supabase.auth.resetPasswordForEmail(email)".to_string()),
            bash: Some(|p| {
                auth_curl(p, "POST", "recover", &[json_content()], Some("{\n  \"email\": \"someone@email.com\"\n}"))
            }),
            ..doc(
                "forgot-password-email",
                "Forgot password / email",
                "Sends the user a log in link via email. Once logged in you should direct the user to a new password form. And use \"Update User\" below to save the new password.",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.updateUser({\n  email: \"new@email.com\",\n  password: \"new-password\",\n  data: { hello: 'world' }\n})".to_string()
            }),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "PUT",
                    "user",
                    &["Authorization: Bearer <USERS-ACCESS-TOKEN>".to_string(), json_content()],
                    Some("{\n  \"email\": \"someone@email.com\",\n  \"password\": \"new-password\",\n  \"data\": {\n    \"key\": \"value\"\n  }\n}"),
                )
            }),
            ..doc(
                "update-user",
                "Update User",
                "Update the user with a new email or password. Each key (email, password, and data) is optional.",
            )
        },
        SectionDoc {
            js: Some(|_| "const { error } = await supabase.auth.signOut()".to_string()),
            bash: Some(|p| {
                auth_curl(
                    p,
                    "POST",
                    "logout",
                    &[json_content(), "Authorization: Bearer USER_TOKEN".to_string()],
                    None,
                )
            }),
            ..doc(
                "log-out",
                "Log out",
                "After calling log out, all interactions using the Supabase JS client will be \"anonymous\".",
            )
        },
        SectionDoc {
            js: Some(|_| {
                "const { data, error } = await supabase.auth.api.inviteUserByEmail('someone@email.com')".to_string()
            }),
            bash: Some(|p| {
                let bearer = format!("Authorization: Bearer {}", p.text(keys::APIKEY));
                auth_curl(
                    p,
                    "POST",
                    "invite",
                    &[bearer, json_content()],
                    Some("{\n  \"email\": \"someone@email.com\"\n}"),
                )
            }),
            ..doc(
                "email-invite",
                "Invite user over email",
                "Send a user a passwordless link which they can use to sign up and log in.\n\nAfter they have clicked the link, all interactions using the Supabase JS client will be performed as \"that user\".\n\nThis endpoint requires you use the `service_role_key` when initializing the client, and should only be invoked from the server, never from the client.",
            )
        },
    ]
}

fn entities() -> Vec<SectionDoc> {
    const GRAPHQL_COMPARISON: &str = r#"// With Apollo GraphQL
const { loading, error, data } = useQuery(gql`
  query GetDogs {
    dogs {
      id
      breed
      owner {
        id
        name
      }
    }
  }
`)

// With Supabase
const { data, error } = await supabase
  .from('dogs')
  .select(`
      id, breed,
      owner (id, name)
  `)"#;

    vec![
        SectionDoc {
            key: "entities-introduction",
            category: Section::Entities,
            title: "Introduction",
            description: Some(
                "All views and tables in the `public` schema, and those accessible by the active database role for a request are available for querying via the API.\n\nIf you don't want to expose tables in your API, simply add them to a different schema (not the `public` schema).",
            ),
            key_role: KeyRole::Anon,
            js: None,
            bash: None,
        },
        SectionDoc {
            key: "generating-types",
            category: Section::Entities,
            title: "Generating Types",
            description: Some(
                "Supabase APIs are generated from your database, which means that we can use database introspection to generate type-safe API definitions.\n\nYou can generate types from your database either through the [Supabase CLI](https://supabase.com/docs/guides/database/api/generating-types), or by downloading the types file and importing it in your application within `src/index.ts`.",
            ),
            key_role: KeyRole::Anon,
            js: None,
            bash: None,
        },
        SectionDoc {
            key: "graphql",
            category: Section::Entities,
            title: "GraphQL vs PostgREST",
            description: Some(
                "If you have a GraphQL background, you might be wondering if you can fetch your data in a single round-trip. The answer is yes! The syntax is very similar. This example shows how you might achieve the same thing with Apollo GraphQL and Supabase.\n\nStill want GraphQL?\nIf you still want to use GraphQL, you can. Supabase provides you with a full Postgres database, so as long as your middleware can connect to the database then you can still use the tools you love. You can find the database connection details [in the settings](/project/[ref]/database/settings).",
            ),
            key_role: KeyRole::Anon,
            js: Some(|_| GRAPHQL_COMPARISON.to_string()),
            bash: Some(|_| GRAPHQL_COMPARISON.to_string()),
        },
    ]
}

fn stored_procedures() -> Vec<SectionDoc> {
    vec![SectionDoc {
        key: "stored-procedures-introduction",
        category: Section::StoredProcedures,
        title: "Introduction",
        description: Some(
            "All of your database stored procedures are available on your API. This means you can build your logic directly into the database (if you're brave enough)!\n\nThe API endpoint supports POST (and in some cases GET) to execute the function.",
        ),
        key_role: KeyRole::Anon,
        js: None,
        bash: None,
    }]
}

fn storage() -> Vec<SectionDoc> {
    vec![SectionDoc {
        key: "storage",
        category: Section::Storage,
        title: "Introduction",
        description: Some(
            "Supabase Storage makes it simple to upload and serve files of any size, providing a robust framework for file access controls.\n\nYou can use Supabase Storage to store images, videos, documents, and any other file type. Serve your assets with a global CDN to reduce latency from over 285 cities globally. Supabase Storage includes a built-in image optimizer, so you can resize and compress your media files on the fly.",
        ),
        key_role: KeyRole::Anon,
        js: None,
        bash: None,
    }]
}

fn edge_functions() -> Vec<SectionDoc> {
    vec![
        SectionDoc {
            key: "edge-function",
            category: Section::EdgeFunctions,
            title: "Introduction",
            description: Some(
                "Edge Functions are server-side TypeScript functions, distributed globally at the edge, close to your users. They can be used for listening to webhooks or integrating your Supabase project with third-parties like Stripe. Edge Functions are developed using Deno.",
            ),
            key_role: KeyRole::Anon,
            js: None,
            bash: None,
        },
        SectionDoc {
            key: "edge-function-pre-req",
            category: Section::EdgeFunctions,
            title: "Pre-requisites",
            description: Some(
                "Follow the steps to prepare your Supabase project on your local machine.\n\n- Install the Supabase [CLI](https://supabase.com/docs/guides/cli).\n- [Login to the CLI](https://supabase.com/docs/reference/cli/usage#supabase-login) using the command: `supabase login`.\n- [Initialize Supabase](https://supabase.com/docs/guides/getting-started/local-development#getting-started) inside your project using the command: `supabase init`.\n- [Link to your Remote Project](https://supabase.com/docs/reference/cli/usage#supabase-link) using the command `supabase link --project-ref [ref]`.\n- Setup your environment: Follow the steps [here](https://supabase.com/docs/guides/functions/quickstart#setting-up-your-environment).",
            ),
            key_role: KeyRole::Anon,
            js: None,
            bash: None,
        },
        SectionDoc {
            key: "create-edge-function",
            category: Section::EdgeFunctions,
            title: "Create an Edge Function",
            description: Some("Create a Supabase Edge Function locally via the Supabase CLI."),
            key_role: KeyRole::Anon,
            js: Some(|_| "// Create an edge function via the Supabase CLI".to_string()),
            bash: Some(|_| "supabase functions new hello-world".to_string()),
        },
        SectionDoc {
            key: "deploy-edge-function",
            category: Section::EdgeFunctions,
            title: "Deploy an Edge Function",
            description: Some("Deploy a Supabase Edge Function to your Supabase project via the Supabase CLI."),
            key_role: KeyRole::Anon,
            js: Some(|_| "// Deploy an edge function via the Supabase CLI".to_string()),
            bash: Some(|_| "supabase functions deploy hello-world --project-ref [ref]".to_string()),
        },
    ]
}

fn realtime() -> Vec<SectionDoc> {
    vec![
        SectionDoc {
            key: "realtime-introduction",
            category: Section::Realtime,
            title: "Introduction",
            description: Some(
                "Supabase provides a globally distributed cluster of Realtime servers that enable the following functionality:\n\n- [Broadcast](https://supabase.com/docs/guides/realtime/broadcast): Send ephemeral messages from client to clients with low latency.\n- [Presence](https://supabase.com/docs/guides/realtime/presence): Track and synchronize shared state between clients.\n- [Postgres Changes](https://supabase.com/docs/guides/realtime/postgres-changes): Listen to Postgres database changes and send them to authorized clients.",
            ),
            key_role: KeyRole::Anon,
            js: None,
            bash: None,
        },
        SectionDoc {
            key: "subscribe-to-channel",
            category: Section::Realtime,
            title: "Subscribe to channel",
            description: Some(
                "Creates an event handler that listens to changes.\n\n- By default, Broadcast and Presence are enabled for all projects.\n- By default, listening to database changes is disabled for new projects due to database performance and security concerns. You can turn it on by managing Realtime's [replication](https://supabase.com/docs/guides/api#realtime-api-overview).\n- You can receive the \"previous\" data for updates and deletes by setting the table's `REPLICA IDENTITY` to `FULL` (e.g., `ALTER TABLE your_table REPLICA IDENTITY FULL;`).\n- Row level security is not applied to delete statements. When RLS is enabled and replica identity is set to full, only the primary key is sent to clients.",
            ),
            key_role: KeyRole::Anon,
            js: Some(|_| {
                r#"supabase
  .channel('any')
  .on('broadcast', { event: 'cursor-pos' }, payload => {
    console.log('Cursor position received!', payload)
  })
  .subscribe((status) => {
    if (status === 'SUBSCRIBED') {
      channel.send({
        type: 'broadcast',
        event: 'cursor-pos',
        payload: { x: Math.random(), y: Math.random() },
      })
    }
  })"#
                .to_string()
            }),
            bash: Some(|_| REALTIME_CLIENT_ONLY.to_string()),
        },
        SectionDoc {
            key: "unsubscribe-channel",
            category: Section::Realtime,
            title: "Unsubscribe from a channel",
            description: Some(
                "Unsubscribes and removes Realtime channel from Realtime client.\n\nRemoving a channel is a great way to maintain the performance of your project's Realtime service as well as your database if you're listening to Postgres changes. Supabase will automatically handle cleanup 30 seconds after a client is disconnected, but unused channels may cause degradation as more clients are simultaneously subscribed.",
            ),
            key_role: KeyRole::Anon,
            js: Some(|_| "supabase.removeChannel(myChannel)".to_string()),
            bash: Some(|_| REALTIME_CLIENT_ONLY.to_string()),
        },
        SectionDoc {
            key: "unsubscribe-channels",
            category: Section::Realtime,
            title: "Unsubscribe from all channels",
            description: Some(
                "Unsubscribes and removes all Realtime channels from Realtime client.\n\nRemoving a channel is a great way to maintain the performance of your project's Realtime service as well as your database if you're listening to Postgres changes. Supabase will automatically handle cleanup 30 seconds after a client is disconnected, but unused channels may cause degradation as more clients are simultaneously subscribed.",
            ),
            key_role: KeyRole::Anon,
            js: Some(|_| "supabase.removeChannels()".to_string()),
            bash: Some(|_| REALTIME_CLIENT_ONLY.to_string()),
        },
        SectionDoc {
            key: "retrieve-all-channels",
            category: Section::Realtime,
            title: "Retrieve all channels",
            description: Some("Returns all Realtime channels."),
            key_role: KeyRole::Anon,
            js: Some(|_| "const channels = supabase.getChannels()".to_string()),
            bash: Some(|_| REALTIME_CLIENT_ONLY.to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::OutputLanguage;
    use crate::template::SnippetTemplate;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let docs = section_docs();
        let keys: HashSet<_> = docs.iter().map(|doc| doc.key).collect();
        assert_eq!(keys.len(), docs.len());
    }

    #[test]
    fn every_section_has_a_doc() {
        let docs = section_docs();
        for section in Section::ALL {
            assert!(docs.iter().any(|doc| doc.category == section), "{section} has no docs");
        }
    }

    #[test]
    fn auth_curl_embeds_endpoint_key_and_body() {
        let params = SnippetParams::new()
            .with(keys::ENDPOINT, "https://x.supabase.co")
            .with(keys::APIKEY, "KEY");
        let docs = section_docs();
        let sign_up = docs.iter().find(|doc| doc.key == "sign-up").unwrap();
        let source = &sign_up.render_for(OutputLanguage::Bash, &params).unwrap()[0].source;

        assert!(source.starts_with("curl -X POST 'https://x.supabase.co/auth/v1/signup' \\\n"));
        assert!(source.contains("-H \"apikey: KEY\""));
        assert!(source.contains("\"password\": \"some-secure-password\""));
    }

    #[test]
    fn intro_init_braces_are_literal() {
        let params = SnippetParams::new().with(keys::ENDPOINT, "https://x.supabase.co");
        let docs = section_docs();
        let init = docs.iter().find(|doc| doc.key == "introduction").unwrap();
        let source = &init.render_for(OutputLanguage::Js, &params).unwrap()[0].source;
        assert!(source.starts_with("import { createClient } from '@supabase/supabase-js'"));
        assert!(source.contains("const supabaseUrl = 'https://x.supabase.co'"));
    }
}
