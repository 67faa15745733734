diesel::table! {
    categories (id) {
        id -> Text,
        names -> Text,
        #[sql_name = "type"]
        category_type -> Text,
        color -> Nullable<Text>,
    }
}

diesel::table! {
    incomes (id) {
        id -> Text,
        name -> Text,
        category -> Text,
        category_id -> Nullable<Text>,
        date -> Date,
        ars -> Double,
        usd -> Double,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    expenses (id) {
        id -> Text,
        name -> Text,
        category -> Text,
        category_id -> Nullable<Text>,
        date -> Date,
        ars -> Double,
        usd -> Double,
        description -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(categories, incomes, expenses);
