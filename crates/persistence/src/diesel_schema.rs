// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    accounts (account_id) {
        account_id -> BigInt,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        role -> Text,
        is_superuser -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    student_profiles (account_id) {
        account_id -> BigInt,
        bio -> Nullable<Text>,
        phone -> Nullable<Text>,
        cv_url -> Nullable<Text>,
    }
}

diesel::table! {
    offers (offer_id) {
        offer_id -> BigInt,
        company_id -> Nullable<BigInt>,
        organization -> Text,
        contact_name -> Text,
        contact_email -> Text,
        title -> Text,
        description -> Text,
        city -> Nullable<Text>,
        duration -> Nullable<Text>,
        domain -> Nullable<Text>,
        remote -> Nullable<Integer>,
        state -> Text,
        closing_reason -> Nullable<Text>,
        submitted_at -> Text,
    }
}

diesel::table! {
    applications (application_id) {
        application_id -> BigInt,
        offer_id -> BigInt,
        student_id -> BigInt,
        status -> Text,
        applied_at -> Text,
    }
}

diesel::table! {
    favorites (favorite_id) {
        favorite_id -> BigInt,
        student_id -> BigInt,
        offer_id -> BigInt,
    }
}

diesel::joinable!(applications -> offers (offer_id));
diesel::joinable!(applications -> accounts (student_id));
diesel::joinable!(favorites -> offers (offer_id));
diesel::joinable!(favorites -> accounts (student_id));
diesel::joinable!(student_profiles -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    student_profiles,
    offers,
    applications,
    favorites,
);
