//! Behaviour every `ArticleCollection` backend must share.

use np_core::prelude::*;

fn sample(title: &str) -> Article {
    Article::new(title, format!("{} body", title), "Test Source")
}

pub async fn run_all(store: &dyn ArticleCollection) {
    insert_one_then_find(store).await;
    find_is_newest_first_and_limited(store).await;
    insert_many_keeps_order(store).await;
    delete_one_by_unknown_id(store).await;
    delete_one_by_issued_id(store).await;
    delete_many_reports_previous_count(store).await;
}

async fn insert_one_then_find(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    let article = sample("Only").with_category("technology");
    let result = store.insert_one(&article).await.unwrap();

    let found = store.find().await.unwrap().into_vec();
    let matching: Vec<_> = found.iter().filter(|s| s.article == article).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, result.inserted_id);
}

async fn find_is_newest_first_and_limited(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    for title in ["first", "second", "third"] {
        store.insert_one(&sample(title)).await.unwrap();
    }

    for n in 0..5 {
        let titles: Vec<String> = store
            .find()
            .await
            .unwrap()
            .limit(n)
            .into_iter()
            .map(|s| s.article.title)
            .collect();
        let expected: Vec<&str> = ["third", "second", "first"].into_iter().take(n).collect();
        assert_eq!(titles, expected, "limit({})", n);
    }
}

async fn insert_many_keeps_order(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    let batch = vec![sample("a"), sample("b"), sample("c")];
    let result = store.insert_many(&batch).await.unwrap();
    assert_eq!(result.inserted_ids.len(), 3);
    assert!(result.inserted_ids.windows(2).all(|w| w[0] < w[1]));

    let ids: Vec<ArticleId> = store.find().await.unwrap().into_iter().map(|s| s.id).collect();
    let mut expected = result.inserted_ids.clone();
    expected.reverse();
    assert_eq!(ids, expected);

    let empty = store.insert_many(&[]).await.unwrap();
    assert!(empty.inserted_ids.is_empty());
    assert_eq!(store.count_documents().await.unwrap(), 3);
}

async fn delete_one_by_unknown_id(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    store.insert_one(&sample("keep")).await.unwrap();
    let before = store.count_documents().await.unwrap();

    let result = store.delete_one(ArticleId::from_raw(i64::MAX)).await.unwrap();
    assert_eq!(result.deleted_count, 0);
    let result = store.delete_one_by_key("not-a-number").await.unwrap();
    assert_eq!(result.deleted_count, 0);

    assert_eq!(store.count_documents().await.unwrap(), before);
}

async fn delete_one_by_issued_id(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    let keep = store.insert_one(&sample("keep")).await.unwrap();
    let gone = store.insert_one(&sample("gone")).await.unwrap();

    let result = store
        .delete_one_by_key(&gone.inserted_id.to_string())
        .await
        .unwrap();
    assert_eq!(result.deleted_count, 1);

    let again = store.delete_one(gone.inserted_id).await.unwrap();
    assert_eq!(again.deleted_count, 0);

    let ids: Vec<ArticleId> = store.find().await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![keep.inserted_id]);
}

async fn delete_many_reports_previous_count(store: &dyn ArticleCollection) {
    store.delete_many().await.unwrap();
    store.insert_many(&[sample("x"), sample("y")]).await.unwrap();
    let before = store.count_documents().await.unwrap();
    assert_eq!(before, 2);

    let result = store.delete_many().await.unwrap();
    assert_eq!(result.deleted_count, before);
    assert_eq!(store.count_documents().await.unwrap(), 0);

    let result = store.delete_many().await.unwrap();
    assert_eq!(result.deleted_count, 0);
}
