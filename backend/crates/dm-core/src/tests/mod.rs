mod device_status;
