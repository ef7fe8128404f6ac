use aws_lambda_events::sqs::{SqsBatchResponse, SqsEvent};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use message_writer::{telemetry, DynamoDbStore, IngestionHandler, Settings};

async fn function_handler(
    event: LambdaEvent<SqsEvent>,
    handler: &IngestionHandler<DynamoDbStore>,
) -> Result<SqsBatchResponse, Error> {
    let (sqs_event, context) = event.into_parts();
    tracing::info!(request_id = %context.request_id, "Processing SQS event");

    Ok(handler.handle_event(sqs_event).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::new()?;
    telemetry::init(&settings.log);

    // One client for the lifetime of the process, shared by every invocation.
    let store = DynamoDbStore::from_settings(&settings).await;
    let handler = IngestionHandler::new(store, settings.failure_reporting());
    tracing::info!(
        table = %handler.store().table_name(),
        failure_reporting = ?handler.failure_reporting(),
        "Message writer initialized"
    );

    let handler_ref = &handler;
    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        function_handler(event, handler_ref).await
    }))
    .await
}
