diesel::table! {
    use diesel::sql_types::*;

    knowledge_documents (id) {
        id -> Uuid,
        name -> Text,
        doc_type -> Text,
        size_bytes -> Int8,
        status -> Text,
        error_message -> Nullable<Text>,
        chunk_count -> Int4,
        created_at -> Timestamptz,
        indexed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    knowledge_chunks (id) {
        id -> Uuid,
        document_id -> Uuid,
        content -> Text,
        embedding -> Nullable<Vector>,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(knowledge_chunks -> knowledge_documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(knowledge_chunks, knowledge_documents);
