//! Route dispatch onto the facade.

use crate::envelope::Envelope;
use crate::error::Error;
use crate::facade::Facade;
use crate::server::{
    request::{
        self, AddIndexRequest, CreateTableRequest, KeyRequest, PutItemRequest, QueryRequest,
        ScanRequest, UpdateItemRequest,
    },
    response::{self, ResponseBody},
    router::Route,
};
use crate::table::{delete_table::DeleteTable, describe_table::DescribeTable};

use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;

async fn run<R, O, T, F>(
    route: &Route,
    body: &[u8],
    call: impl FnOnce(O) -> F,
) -> http::Response<ResponseBody>
where
    R: DeserializeOwned,
    O: TryFrom<R, Error = Error>,
    T: Serialize,
    F: Future<Output = Envelope<T>>,
{
    let operation = match request::decode::<R>(body).and_then(O::try_from) {
        Ok(operation) => operation,
        Err(error) => return response::rejection(route, &error),
    };
    response::envelope(route, &call(operation).await)
}

/// Run one route against the facade and encode the result.
///
/// At most one facade operation runs; requests rejected while decoding never
/// reach it.
pub async fn handle_route<F: Facade + ?Sized>(
    facade: &F,
    route: &Route,
    body: &[u8],
) -> http::Response<ResponseBody> {
    tracing::debug!(?route, "dispatching route");
    match route {
        Route::Health => response::health(),
        Route::CreateTable => {
            run::<CreateTableRequest, _, _, _>(route, body, |create_table| {
                facade.create_table(create_table)
            })
            .await
        }
        Route::DescribeTable(table_name) => {
            let describe_table = DescribeTable {
                table_name: table_name.clone(),
            };
            response::envelope(route, &facade.describe_table(describe_table).await)
        }
        Route::DeleteTable(table_name) => {
            let delete_table = DeleteTable {
                table_name: table_name.clone(),
            };
            response::envelope(route, &facade.delete_table(delete_table).await)
        }
        Route::AddIndex => {
            run::<AddIndexRequest, _, _, _>(route, body, |add_index| facade.add_index(add_index))
                .await
        }
        Route::PutItem => {
            run::<PutItemRequest, _, _, _>(route, body, |put_item| facade.put_item(put_item)).await
        }
        Route::GetItem => {
            run::<KeyRequest, _, _, _>(route, body, |get_item| facade.get_item(get_item)).await
        }
        Route::UpdateItem => {
            run::<UpdateItemRequest, _, _, _>(route, body, |update_item| {
                facade.update_item(update_item)
            })
            .await
        }
        Route::DeleteItem => {
            run::<KeyRequest, _, _, _>(route, body, |delete_item| facade.delete_item(delete_item))
                .await
        }
        Route::Query => {
            run::<QueryRequest, _, _, _>(route, body, |query| facade.query(query)).await
        }
        Route::Scan => run::<ScanRequest, _, _, _>(route, body, |scan| facade.scan(scan)).await,
    }
}
