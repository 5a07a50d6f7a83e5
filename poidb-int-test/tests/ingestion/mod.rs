mod csv_ingest_test;
mod output_test;
