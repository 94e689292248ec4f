//! Per-resource operation templates. Every template reads the resource name
//! from `resourceId`.

use super::section_docs::shell_lines;
use super::{keys, OperationSample, ResourceDoc, SnippetParams};
use crate::section::Section;

pub const INVOKE_FUNCTION: &str = "invoke-function";
pub const READ_ROWS: &str = "read-rows";
pub const FILTER_ROWS: &str = "filter-rows";
pub const INSERT_ROWS: &str = "insert-rows";
pub const UPDATE_ROWS: &str = "update-rows";
pub const DELETE_ROWS: &str = "delete-rows";
pub const SUBSCRIBE_CHANGES: &str = "subscribe-changes";
pub const UPLOAD_FILE: &str = "upload-file";
pub const DELETE_FILES: &str = "delete-files";
pub const LIST_FILES: &str = "list-files";
pub const DOWNLOAD_FILE: &str = "download-file";
pub const CREATE_SIGNED_URL: &str = "create-signed-url";
pub const RETRIEVE_PUBLIC_URL: &str = "retrieve-public-url";
pub const INVOKE_EDGE_FUNCTION: &str = "invoke-edge-function";

const REALTIME_CLIENT_ONLY: &str = "# Realtime streams are only supported by our client libraries";

/// Whether a bucket operation belongs in the menu of a bucket with the given
/// visibility. Signed URLs only make sense for private buckets and public
/// URLs only for public ones.
pub fn shown_for_bucket(key: &str, is_public: bool) -> bool {
    match key {
        CREATE_SIGNED_URL => !is_public,
        RETRIEVE_PUBLIC_URL => is_public,
        _ => true,
    }
}

pub fn resource_docs() -> Vec<ResourceDoc> {
    vec![
        ResourceDoc {
            key: INVOKE_FUNCTION,
            category: Section::StoredProcedures,
            title: "Invoke function",
            description: None,
            docs_url: "https://supabase.com/docs/reference/javascript/rpc",
            code: invoke_function,
        },
        ResourceDoc {
            key: READ_ROWS,
            category: Section::Entities,
            title: "Read rows",
            description: Some("To read rows in this table, use the `select` method."),
            docs_url: "https://supabase.com/docs/reference/javascript/select",
            code: read_rows,
        },
        ResourceDoc {
            key: FILTER_ROWS,
            category: Section::Entities,
            title: "Filtering",
            description: Some("Supabase provides a wide range of filters"),
            docs_url: "https://supabase.com/docs/reference/javascript/using-filters",
            code: filter_rows,
        },
        ResourceDoc {
            key: INSERT_ROWS,
            category: Section::Entities,
            title: "Insert rows",
            description: Some(
                "`insert` lets you insert into your tables. You can also insert in bulk and do UPSERT.\n\n`insert` will also return the replaced values for UPSERT.",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/insert",
            code: insert_rows,
        },
        ResourceDoc {
            key: UPDATE_ROWS,
            category: Section::Entities,
            title: "Update rows",
            description: Some(
                "`update` lets you update rows. `update` will match all rows by default. You can update specific rows using horizontal filters, e.g. `eq`, `lt`, and `is`.\n\n`update` will also return the replaced values for UPDATE.",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/update",
            code: update_rows,
        },
        ResourceDoc {
            key: DELETE_ROWS,
            category: Section::Entities,
            title: "Delete rows",
            description: Some(
                "`delete` lets you delete rows. `delete` will match all rows by default, so remember to specify your filters!",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/delete",
            code: delete_rows,
        },
        ResourceDoc {
            key: SUBSCRIBE_CHANGES,
            category: Section::Entities,
            title: "Subscribe to changes",
            description: Some(
                "Supabase provides realtime functionality and broadcasts database changes to authorized users depending on Row Level Security (RLS) policies.",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/subscribe",
            code: subscribe_changes,
        },
        ResourceDoc {
            key: UPLOAD_FILE,
            category: Section::Storage,
            title: "Upload a file",
            description: Some(
                "Upload a file to an existing bucket. RLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: only `insert` when you are uploading new files and `select`, `insert`, and `update` when you are upserting files.",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-upload",
            code: upload_file,
        },
        ResourceDoc {
            key: DELETE_FILES,
            category: Section::Storage,
            title: "Delete files",
            description: Some(
                "Delete files within the bucket. RLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: `delete` and `select`",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-remove",
            code: delete_files,
        },
        ResourceDoc {
            key: LIST_FILES,
            category: Section::Storage,
            title: "List all files",
            description: Some(
                "List all files within the bucket. RLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: `select`",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-list",
            code: list_files,
        },
        ResourceDoc {
            key: DOWNLOAD_FILE,
            category: Section::Storage,
            title: "Download a file",
            description: Some(
                "Downloads a file from a private bucket. For public buckets, make a request to the URL returned from getPublicUrl instead. RLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: `select`",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-download",
            code: download_file,
        },
        ResourceDoc {
            key: CREATE_SIGNED_URL,
            category: Section::Storage,
            title: "Create a signed URL",
            description: Some(
                "Create a signed URL which can be used to share a file for a fixed amount of time. RLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: `select`",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-createsignedurl",
            code: create_signed_url,
        },
        ResourceDoc {
            key: RETRIEVE_PUBLIC_URL,
            category: Section::Storage,
            title: "Retrieve public URL",
            description: Some(
                "A simple convenience function to get the URL for an asset in a public bucket. If you do not want to use this function, you can construct the public URL by concatenating the bucket URL with the path to the asset.\n\nThis function does not verify if the bucket is public. If a public URL is created for a bucket which is not public, you will not be able to download the asset.\n\nThe bucket needs to be set to public, either via `updateBucket()` or by going to Storage on supabase.com/dashboard, clicking the overflow menu on a bucket and choosing \"Make public\"\n\nRLS policy permissions required:\n- `buckets` table permissions: none\n- `objects` table permissions: none",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/storage-from-getpublicurl",
            code: retrieve_public_url,
        },
        ResourceDoc {
            key: INVOKE_EDGE_FUNCTION,
            category: Section::EdgeFunctions,
            title: "Invoke an edge function",
            description: Some(
                "Invokes a Supabase Edge Function. Requires an Authorization header, and invoke params generally match the [Fetch API](https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API) spec.\n\nWhen you pass in a body to your function, we automatically attach the `Content-Type` header for `Blob`, `ArrayBuffer`, `File`, `FormData` and `String`. If it doesn't match any of these types we assume the payload is `json`, serialize it and attach the `Content-Type` header as `application/json`. You can override this behavior by passing in a `Content-Type` header of your own.\n\nResponses are automatically parsed as `json`, `blob` and `form-data` depending on the `Content-Type` header sent by your function. Responses are parsed as `text` by default.",
            ),
            docs_url: "https://supabase.com/docs/reference/javascript/functions-invoke",
            code: invoke_edge_function,
        },
    ]
}

fn sample(key: &'static str, title: Option<&'static str>, js: String, bash: String) -> OperationSample {
    OperationSample { key, title, js, bash }
}

/// `apikey` plus bearer headers for the REST API.
fn rest_auth(apikey: &str) -> [String; 2] {
    [
        format!("-H \"apikey: {apikey}\""),
        format!("-H \"Authorization: Bearer {apikey}\""),
    ]
}

fn bearer(apikey: &str) -> String {
    format!("-H \"Authorization: Bearer {apikey}\"")
}

fn json_header() -> String {
    "-H \"Content-Type: application/json\"".to_string()
}

// --- Stored procedures ---

fn invoke_function(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let name = p.text(keys::RESOURCE_ID);
    let params = p.list(keys::RPC_PARAMS);

    let mut bash = vec![format!("curl -X POST '{endpoint}/rest/v1/rpc/{name}'")];
    if !params.is_empty() {
        let body = params
            .iter()
            .map(|param| format!("\"{param}\": \"value\""))
            .collect::<Vec<_>>()
            .join(", ");
        bash.push(format!("-d '{{ {body} }}'"));
    }
    bash.push(json_header());
    bash.push(format!("-H \"apikey: {apikey}\""));
    if p.flag(keys::SHOW_BEARER, true) {
        bash.push(bearer(&apikey));
    }

    let js_args = if params.is_empty() {
        String::new()
    } else {
        let fields = params
            .iter()
            .map(|param| format!("\n    {param}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(", {{{fields}\n  }}")
    };
    let js = format!(
        "let {{ data, error }} = await supabase\n  .rpc('{name}'{js_args})\n\nif (error) console.error(error)\nelse console.log(data)"
    );

    vec![sample("rpc-single", None, js, shell_lines(bash))]
}

// --- Tables and views ---

fn select_js(id: &str, select: &str, tail: &str) -> String {
    format!("let {{ data: {id}, error }} = await supabase\n  .from('{id}')\n  .select({select}){tail}")
}

fn read_rows(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let id = p.text(keys::RESOURCE_ID);
    let get = |query: &str| {
        let mut lines = vec![format!("curl '{endpoint}/rest/v1/{id}?select={query}'")];
        lines.extend(rest_auth(&apikey));
        lines
    };

    let mut paginated = get("*");
    paginated.push("-H \"Range: 0-9\"".to_string());

    vec![
        sample(
            "read-all-rows",
            Some("Read all rows"),
            select_js(&id, "'*'", ""),
            shell_lines(get("*")),
        ),
        sample(
            "read-specific-columns",
            Some("Read specific columns"),
            select_js(&id, "'some_column,other_column'", ""),
            shell_lines(get("some_column,other_column")),
        ),
        sample(
            "read-foreign-tables",
            Some("Read referenced tables"),
            select_js(
                &id,
                "`\n    some_column,\n    other_table (\n      foreign_key\n    )\n  `",
                "",
            ),
            shell_lines(get("some_column,other_table(foreign_key)")),
        ),
        sample(
            "with-pagination",
            Some("With pagination"),
            select_js(&id, "'*'", "\n  .range(0, 9)"),
            shell_lines(paginated),
        ),
    ]
}

const FILTER_CHAIN_JS: &str = "

  // Filters
  .eq('column', 'Equal to')
  .gt('column', 'Greater than')
  .lt('column', 'Less than')
  .gte('column', 'Greater than or equal to')
  .lte('column', 'Less than or equal to')
  .like('column', '%CaseSensitive%')
  .ilike('column', '%CaseInsensitive%')
  .is('column', null)
  .in('column', ['Array', 'Values'])
  .neq('column', 'Not equal to')

  // Arrays
  .contains('array_column', ['array', 'contains'])
  .containedBy('array_column', ['contained', 'by'])

  // Logical operators
  .not('column', 'like', 'Negate filter')
  .or('some_column.eq.Some value, other_column.eq.Other value')";

const FILTER_ARGS_BASH: &[&str] = &[
    "-H \"Range: 0-9\"",
    "-d \"select=*\"",
    "",
    "`# Filters`",
    "-d \"column=eq.Equal+to\"",
    "-d \"column=gt.Greater+than\"",
    "-d \"column=lt.Less+than\"",
    "-d \"column=gte.Greater+than+or+equal+to\"",
    "-d \"column=lte.Less+than+or+equal+to\"",
    "-d \"column=like.*CaseSensitive*\"",
    "-d \"column=ilike.*CaseInsensitive*\"",
    "-d \"column=is.null\"",
    "-d \"column=in.(Array,Values)\"",
    "-d \"column=neq.Not+equal+to\"",
    "",
    "`# Arrays`",
    "-d \"array_column=cs.{array,contains}\"",
    "-d \"array_column=cd.{contained,by}\"",
    "",
    "`# Logical operators`",
    "-d \"column=not.like.Negate+filter\"",
    "-d \"or=(some_column.eq.Some+value,other_column.eq.Other+value)\"",
];

fn filter_rows(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let id = p.text(keys::RESOURCE_ID);

    let mut bash = vec![format!("curl --get '{endpoint}/rest/v1/{id}'")];
    bash.extend(rest_auth(&apikey));
    bash.extend(FILTER_ARGS_BASH.iter().map(|arg| arg.to_string()));

    vec![sample(
        "with-filtering",
        Some("With filtering"),
        select_js(&id, "\"*\"", FILTER_CHAIN_JS),
        shell_lines(bash),
    )]
}

fn write_js(id: &str, call: &str) -> String {
    format!("const {{ data, error }} = await supabase\n  .from('{id}')\n  {call}\n  .select()")
}

fn insert_rows(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let id = p.text(keys::RESOURCE_ID);
    let post = |prefer: Option<&str>, body: &str| {
        let mut lines = vec![format!("curl -X POST '{endpoint}/rest/v1/{id}'")];
        lines.extend(rest_auth(&apikey));
        lines.push(json_header());
        lines.extend(prefer.map(|prefer| format!("-H \"Prefer: {prefer}\"")));
        lines.push(format!("-d '{body}'"));
        shell_lines(lines)
    };

    vec![
        sample(
            "insert-a-row",
            Some("Insert a row"),
            write_js(
                &id,
                ".insert([\n    { some_column: 'someValue', other_column: 'otherValue' },\n  ])",
            ),
            post(
                Some("return=minimal"),
                "{ \"some_column\": \"someValue\", \"other_column\": \"otherValue\" }",
            ),
        ),
        sample(
            "insert-many-rows",
            Some("Insert many rows"),
            write_js(
                &id,
                ".insert([\n    { some_column: 'someValue' },\n    { some_column: 'otherValue' },\n  ])",
            ),
            post(None, "[{ \"some_column\": \"someValue\" }, { \"other_column\": \"otherValue\" }]"),
        ),
        sample(
            "upsert-matching-rows",
            Some("Upsert matching rows"),
            write_js(&id, ".upsert({ some_column: 'someValue' })"),
            post(
                Some("resolution=merge-duplicates"),
                "{ \"some_column\": \"someValue\", \"other_column\": \"otherValue\" }",
            ),
        ),
    ]
}

fn update_rows(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let id = p.text(keys::RESOURCE_ID);

    let mut bash = vec![format!("curl -X PATCH '{endpoint}/rest/v1/{id}?some_column=eq.someValue'")];
    bash.extend(rest_auth(&apikey));
    bash.push(json_header());
    bash.push("-H \"Prefer: return=minimal\"".to_string());
    bash.push("-d '{ \"other_column\": \"otherValue\" }'".to_string());

    vec![sample(
        "update-matching-rows",
        Some("Update matching rows"),
        write_js(
            &id,
            ".update({ other_column: 'otherValue' })\n  .eq('some_column', 'someValue')",
        ),
        shell_lines(bash),
    )]
}

fn delete_rows(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let id = p.text(keys::RESOURCE_ID);

    let mut bash = vec![format!("curl -X DELETE '{endpoint}/rest/v1/{id}?some_column=eq.someValue'")];
    bash.extend(rest_auth(&apikey));

    vec![sample(
        "delete-matching-rows",
        Some("Delete matching rows"),
        format!(
            "const {{ error }} = await supabase\n  .from('{id}')\n  .delete()\n  .eq('some_column', 'someValue')"
        ),
        shell_lines(bash),
    )]
}

fn subscribe_js(channel: &str, event: &str, table: &str, filter: Option<&str>) -> String {
    let filter = filter
        .map(|filter| format!(", filter: '{filter}'"))
        .unwrap_or_default();
    format!(
        "const channels = supabase.channel('{channel}')\n  .on(\n    'postgres_changes',\n    {{ event: '{event}', schema: 'public', table: '{table}'{filter} }},\n    (payload) => {{\n      console.log('Change received!', payload)\n    }}\n  )\n  .subscribe()"
    )
}

fn subscribe_changes(p: &SnippetParams) -> Vec<OperationSample> {
    let id = p.text(keys::RESOURCE_ID);
    let variants = [
        ("subscribe-all-events", "Subscribe to all events", "custom-all-channel", "*", None),
        ("subscribe-to-inserts", "Subscribe to inserts", "custom-insert-channel", "INSERT", None),
        ("subscribe-to-updates", "Subscribe to updates", "custom-update-channel", "UPDATE", None),
        ("subscribe-to-deletes", "Subscribe to deletes", "custom-delete-channel", "DELETE", None),
        (
            "subscribe-to-specific-rows",
            "Subscribe to specific rows",
            "custom-filter-channel",
            "*",
            Some("some_column=eq.some_value"),
        ),
    ];

    variants
        .into_iter()
        .map(|(key, title, channel, event, filter)| {
            sample(
                key,
                Some(title),
                subscribe_js(channel, event, &id, filter),
                REALTIME_CLIENT_ONLY.to_string(),
            )
        })
        .collect()
}

// --- Storage buckets ---

fn storage_js(bucket: &str, call: &str) -> String {
    format!("const {{ data, error }} = await supabase\n  .storage\n  .from('{bucket}')\n  {call}")
}

fn upload_file(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl -X POST '{endpoint}/storage/v1/object/{bucket}/folder/avatar1.png'"),
        "-H 'Content-Type: image/png'".to_string(),
        bearer(&p.text(keys::APIKEY)),
        "--data-binary @/path/to/your/file".to_string(),
    ];
    let js = format!(
        "const avatarFile = event.target.files[0]\n{}",
        storage_js(
            &bucket,
            ".upload('folder/avatar1.png', avatarFile, {\n    cacheControl: '3600',\n    upsert: false\n  })",
        )
    );
    vec![sample("storage-upload-file", None, js, shell_lines(bash))]
}

fn delete_files(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl -X DELETE '{endpoint}/storage/v1/object/{bucket}'"),
        json_header(),
        bearer(&p.text(keys::APIKEY)),
        "-d '{ \"prefixes\": [\"file_name\", \"another_file_name\"] }'".to_string(),
    ];
    vec![sample(
        "storage-delete-files",
        None,
        storage_js(&bucket, ".remove(['folder/avatar1.png'])"),
        shell_lines(bash),
    )]
}

fn list_files(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl -X POST '{endpoint}/storage/v1/object/list/{bucket}'"),
        json_header(),
        bearer(&p.text(keys::APIKEY)),
        "-d '{ \"limit\": 100, \"offset\": 0, \"prefix\": \"\", \"sortBy\": { \"column\": \"name\", \"order\": \"asc\" } }'"
            .to_string(),
    ];
    vec![sample(
        "storage-list-files",
        None,
        storage_js(
            &bucket,
            ".list('folder', {\n    limit: 100,\n    offset: 0,\n    sortBy: { column: 'name', order: 'asc' },\n  })",
        ),
        shell_lines(bash),
    )]
}

fn download_file(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl -X GET '{endpoint}/storage/v1/object/{bucket}/folder/avatar1.png'"),
        json_header(),
        bearer(&p.text(keys::APIKEY)),
        "--output avatar1.png".to_string(),
    ];
    vec![sample(
        "storage-download-file",
        None,
        storage_js(&bucket, ".download('folder/avatar1.png')"),
        shell_lines(bash),
    )]
}

fn create_signed_url(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl -X POST '{endpoint}/storage/v1/object/sign/{bucket}/folder/avatar1.png'"),
        json_header(),
        bearer(&p.text(keys::APIKEY)),
        "-d '{ \"expiresIn\": 60 }'".to_string(),
    ];
    vec![sample(
        "storage-create-signed-url",
        None,
        storage_js(&bucket, ".createSignedUrl('folder/avatar1.png', 60)"),
        shell_lines(bash),
    )]
}

fn retrieve_public_url(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let bucket = p.text(keys::RESOURCE_ID);
    let bash = format!(
        "# No bash command available.\n# You can construct the public URL by concatenating the bucket URL with the path to the asset\n# e.g {endpoint}/storage/v1/object/public/{bucket}/folder/avatar1.png"
    );
    let js = format!(
        "const {{ data }} = supabase\n  .storage\n  .from('{bucket}')\n  .getPublicUrl('folder/avatar1.png')"
    );
    vec![sample("storage-retrieve-public-url", None, js, bash)]
}

// --- Edge functions ---

fn invoke_edge_function(p: &SnippetParams) -> Vec<OperationSample> {
    let endpoint = p.text(keys::ENDPOINT);
    let apikey = p.text(keys::APIKEY);
    let name = p.text(keys::RESOURCE_ID);
    let bash = [
        format!("curl --request POST '{endpoint}/functions/v1/{name}'"),
        format!("--header 'Authorization: Bearer {apikey}'"),
        "--header 'Content-Type: application/json'".to_string(),
        "--data '{ \"name\": \"Functions\" }'".to_string(),
    ];
    let js = format!(
        "const {{ data, error }} = await supabase\n  .functions\n  .invoke('{name}', {{\n    body: {{ foo: 'bar' }}\n  }})"
    );
    vec![sample("invoke-edge-function", None, js, shell_lines(bash))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::OutputLanguage;
    use crate::template::SnippetTemplate;

    fn doc(key: &str) -> ResourceDoc {
        resource_docs()
            .into_iter()
            .find(|doc| doc.key == key)
            .unwrap()
    }

    fn params(resource: &str) -> SnippetParams {
        SnippetParams::new()
            .with(keys::RESOURCE_ID, resource)
            .with(keys::ENDPOINT, "https://abcxyz.supabase.co")
            .with(keys::APIKEY, "anon-key")
    }

    #[test]
    fn read_rows_has_four_variants() {
        let samples = doc(READ_ROWS)
            .render_for(OutputLanguage::Js, &params("users"))
            .unwrap();
        let keys: Vec<_> = samples.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            ["read-all-rows", "read-specific-columns", "read-foreign-tables", "with-pagination"]
        );
        assert!(samples[0].source.contains(".from('users')"));
        assert!(samples[0].source.starts_with("let { data: users, error } = await supabase"));
        assert!(samples[3].source.ends_with(".range(0, 9)"));
    }

    #[test]
    fn rpc_without_params_omits_body_and_args() {
        let samples = doc(INVOKE_FUNCTION)
            .render_for(OutputLanguage::Bash, &params("now"))
            .unwrap();
        assert!(!samples[0].source.contains("-d '"));
        assert!(samples[0].source.contains("Authorization: Bearer anon-key"));

        let js = doc(INVOKE_FUNCTION)
            .render_for(OutputLanguage::Js, &params("now"))
            .unwrap();
        assert!(js[0].source.contains(".rpc('now')"));
    }

    #[test]
    fn rpc_with_params_lists_them() {
        let p = params("add")
            .with_list(keys::RPC_PARAMS, vec!["a".into(), "b".into()])
            .with(keys::SHOW_BEARER, "false");

        let bash = &doc(INVOKE_FUNCTION).render_for(OutputLanguage::Bash, &p).unwrap()[0].source;
        assert!(bash.contains("-d '{ \"a\": \"value\", \"b\": \"value\" }'"));
        assert!(!bash.contains("Authorization"));

        let js = &doc(INVOKE_FUNCTION).render_for(OutputLanguage::Js, &p).unwrap()[0].source;
        assert!(js.contains(".rpc('add', {\n    a, \n    b\n  })"));
    }

    #[test]
    fn subscribe_bash_is_client_only() {
        let samples = doc(SUBSCRIBE_CHANGES)
            .render_for(OutputLanguage::Bash, &params("users"))
            .unwrap();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.source == REALTIME_CLIENT_ONLY));
    }

    #[test]
    fn bucket_menu_depends_on_visibility() {
        assert!(shown_for_bucket(RETRIEVE_PUBLIC_URL, true));
        assert!(!shown_for_bucket(CREATE_SIGNED_URL, true));
        assert!(shown_for_bucket(CREATE_SIGNED_URL, false));
        assert!(!shown_for_bucket(RETRIEVE_PUBLIC_URL, false));
        assert!(shown_for_bucket(UPLOAD_FILE, false));
    }

    #[test]
    fn every_resource_template_links_docs() {
        for doc in resource_docs() {
            assert!(doc.docs_url.starts_with("https://supabase.com/docs/reference/javascript/"));
            assert!(doc.category.has_resources(), "{} is in a resourceless section", doc.key);
        }
    }
}
